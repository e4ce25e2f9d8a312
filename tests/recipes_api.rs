//! End to end checks: load a directory of recipe files and query it over
//! HTTP.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use recipe_manager::{Catalog, Directory, LoadError, Recipe, RecipeRepository, server};
use tempfile::TempDir;
use tower::ServiceExt;

fn recipes_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("recipes1.json"),
        r#"[{"id": "1", "name": "Pancakes", "ingredients": [
            {"name": "Flour", "quantity": 200, "unit": "grams"},
            {"name": "Milk", "quantity": 300, "unit": "ml"}
        ]}]"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("recipes2.json"),
        r#"[{"id": "2", "name": "Omelette", "ingredients": [
            {"name": "Egg", "quantity": 3, "unit": "pieces"}
        ]}]"#,
    )
    .unwrap();
    tmp
}

fn app(directory: Directory) -> Router {
    server::router(Arc::new(Catalog::new(directory)), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[test]
fn loads_both_files() {
    let tmp = recipes_dir();

    let directory = Directory::load(tmp.path()).unwrap();

    assert_eq!(directory.list_all(None).len(), 2);
    assert_eq!(directory.find_by_id("1").unwrap().name, "Pancakes");
    assert_eq!(directory.find_by_id("2").unwrap().ingredients.len(), 1);
}

#[test]
fn duplicate_identifier_prevents_startup() {
    let tmp = recipes_dir();
    std::fs::write(
        tmp.path().join("recipes3.json"),
        r#"[{"id": "2", "name": "Another omelette"}]"#,
    )
    .unwrap();

    let error = Directory::load(tmp.path()).unwrap_err();

    assert!(matches!(error, LoadError::DuplicateId { .. }));
    assert!(error.to_string().contains("'2'"));
    assert!(error.to_string().contains("recipes3.json"));
}

#[tokio::test]
async fn scaled_recipe_round_trip() {
    let tmp = recipes_dir();
    let app = app(Directory::load(tmp.path()).unwrap());

    let (status, body) = get(app.clone(), "/recipe/1?ingredient=Flour&quantity=400").await;
    assert_eq!(status, StatusCode::OK);
    let scaled: Recipe = serde_json::from_slice(&body).unwrap();
    assert!((scaled.ingredients[0].quantity - 400.0).abs() < 1e-9);
    assert!((scaled.ingredients[1].quantity - 600.0).abs() < 1e-9);

    let (status, body) = get(app.clone(), "/recipe/1?ingredient=Sugar&quantity=100").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "ingredient constraint 'Sugar' not found in recipe"
    );

    let (_, body) = get(app, "/recipe/1").await;
    let original: Recipe = serde_json::from_slice(&body).unwrap();
    assert!((original.ingredients[1].quantity - 300.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn listing_endpoints() {
    let tmp = recipes_dir();
    let app = app(Directory::load(tmp.path()).unwrap());

    let (status, body) = get(app.clone(), "/recipes").await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<_> = serde_json::from_slice::<Vec<Recipe>>(&body)
        .unwrap()
        .into_iter()
        .map(|recipe| recipe.name)
        .collect();
    names.sort();
    assert_eq!(names, ["Omelette", "Pancakes"]);

    let (_, body) = get(app.clone(), "/recipes?ingredient=Flour").await;
    let filtered: Vec<Recipe> = serde_json::from_slice(&body).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "1");

    let (_, body) = get(app, "/ingredients").await;
    let mut ingredients: Vec<String> = serde_json::from_slice(&body).unwrap();
    ingredients.sort();
    assert_eq!(ingredients, ["Egg", "Flour", "Milk"]);
}
