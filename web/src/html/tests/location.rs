use super::*;
use libspots::location::{Category, Location};
use test_log::test;

#[test(sqlx::test(
    migrations = "../db/migrations/",
    fixtures(path = "../../../../db/fixtures", scripts("locations"))
))]
async fn test_map_page(pool: Pool<Sqlite>) {
    let (mut app, _state, _uploads) = test_app(pool);

    let response = get_page(&mut app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    // the marker data is embedded as json, one object per location
    assert_eq!(body.matches("\"name\":").count(), 3);
    assert!(body.contains("\"name\":\"Örebro Castle\""));
    // the table shows every location
    assert!(body.contains("<td>Wadköping</td>"));
    assert!(body.contains("<td>Nature</td>"));
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_add_location(pool: Pool<Sqlite>) {
    let (mut app, state, _uploads) = test_app(pool);

    let response = post_form(
        &mut app,
        "/location/new",
        &[
            ("name", "Castle"),
            ("latitude", "59.275"),
            ("longitude", "15.213"),
            ("category", "Historical"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Added Castle!"));
    // the page that comes back already includes the new marker
    assert!(body.contains("\"name\":\"Castle\""));

    let locations = Location::load_all(&state.db).await.expect("failed to load");
    assert_eq!(locations.len(), 1);
    let loc = &locations[0];
    assert_eq!(loc.name, "Castle");
    assert_eq!(loc.latitude, 59.275);
    assert_eq!(loc.longitude, 15.213);
    assert_eq!(loc.category, Category::Historical);
    assert_ne!(loc.id, -1);
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_add_location_accepts_range_edges(pool: Pool<Sqlite>) {
    let (mut app, state, _uploads) = test_app(pool);

    for (lat, lon) in [("59.0", "15.0"), ("60.0", "16.0")] {
        let response = post_form(
            &mut app,
            "/location/new",
            &[
                ("name", "Edge"),
                ("latitude", lat),
                ("longitude", lon),
                ("category", "Nature"),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Added Edge!"), "edge value {lat}/{lon} rejected");
    }

    let locations = Location::load_all(&state.db).await.expect("failed to load");
    assert_eq!(locations.len(), 2);
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_add_location_rejects_out_of_range(pool: Pool<Sqlite>) {
    let (mut app, state, _uploads) = test_app(pool);

    let response = post_form(
        &mut app,
        "/location/new",
        &[
            ("name", "Elsewhere"),
            ("latitude", "58.9"),
            ("longitude", "15.5"),
            ("category", "Food"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("outside the supported range"));
    // the rejected values are offered back in the form
    assert!(body.contains("58.9"));

    let locations = Location::load_all(&state.db).await.expect("failed to load");
    assert!(locations.is_empty());
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_add_location_requires_name(pool: Pool<Sqlite>) {
    let (mut app, state, _uploads) = test_app(pool);

    let response = post_form(
        &mut app,
        "/location/new",
        &[
            ("name", ""),
            ("latitude", "59.5"),
            ("longitude", "15.5"),
            ("category", "Bikes"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("is missing"));

    let locations = Location::load_all(&state.db).await.expect("failed to load");
    assert!(locations.is_empty());
}
