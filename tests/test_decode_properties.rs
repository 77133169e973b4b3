use recipe_fetch::{decode_recipes, decode_response, find_recipe, Recipe, RecipeError, RecipeResponse};

fn recipe(index: usize, with_links: bool) -> Recipe {
    Recipe {
        cuisine: format!("Cuisine {index}"),
        name: format!("Recipe {index}"),
        photo_url_large: format!("https://example.com/{index}/large.jpg"),
        photo_url_small: format!("https://example.com/{index}/small.jpg"),
        source_url: with_links.then(|| format!("https://example.com/{index}")),
        uuid: format!("uuid-{index}"),
        youtube_url: with_links.then(|| format!("https://www.youtube.com/watch?v={index}")),
    }
}

#[test]
fn test_butter_chicken_scenario() {
    let json = r#"{"recipes":[{"cuisine":"Indian","name":"Butter Chicken","photo_url_large":"https://x/l.jpg","photo_url_small":"https://x/s.jpg","source_url":"https://x/r","uuid":"777e4567-e89b-12d3-a456-426614174333","youtube_url":"https://x/y"}]}"#;

    let recipes = decode_recipes(json.as_bytes()).unwrap();

    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.cuisine, "Indian");
    assert_eq!(recipe.name, "Butter Chicken");
    assert_eq!(recipe.photo_url_large, "https://x/l.jpg");
    assert_eq!(recipe.photo_url_small, "https://x/s.jpg");
    assert_eq!(recipe.source_url.as_deref(), Some("https://x/r"));
    assert_eq!(recipe.youtube_url.as_deref(), Some("https://x/y"));
}

#[test]
fn test_n_entries_decode_to_n_records_in_order() {
    for n in [0, 1, 2, 25] {
        let response = RecipeResponse {
            recipes: (0..n).map(|i| recipe(i, i % 2 == 0)).collect(),
        };
        let bytes = serde_json::to_vec(&response).unwrap();

        let decoded = decode_recipes(&bytes).unwrap();
        assert_eq!(decoded.len(), n);
        for (i, r) in decoded.iter().enumerate() {
            assert_eq!(r.uuid, format!("uuid-{i}"));
        }
    }
}

#[test]
fn test_response_round_trip() {
    let response = RecipeResponse {
        recipes: vec![recipe(0, false), recipe(1, true)],
    };
    let bytes = serde_json::to_vec(&response).unwrap();

    assert_eq!(decode_response(&bytes).unwrap(), response);
}

#[test]
fn test_wrong_type_in_any_position_fails_whole_payload() {
    let fields = ["cuisine", "name", "photo_url_large", "photo_url_small", "uuid"];
    let bad_values = ["42", "{}", "[\"a\"]", "true", "null"];

    for field in fields {
        for bad in bad_values {
            let mut records: Vec<serde_json::Value> = (0..3)
                .map(|i| serde_json::to_value(recipe(i, true)).unwrap())
                .collect();
            records[1][field] = serde_json::from_str(bad).unwrap();
            let payload = serde_json::json!({ "recipes": records });

            let result = decode_recipes(payload.to_string().as_bytes());
            assert!(
                matches!(result, Err(RecipeError::Decode(_))),
                "{field} = {bad} should fail decoding"
            );
        }
    }
}

#[test]
fn test_find_recipe_by_uuid() {
    let recipes = vec![recipe(0, false), recipe(1, true)];

    assert_eq!(find_recipe(&recipes, "uuid-1").unwrap().name, "Recipe 1");
    assert!(matches!(
        find_recipe(&recipes, "uuid-9"),
        Err(RecipeError::NotFound(uuid)) if uuid == "uuid-9"
    ));
}
