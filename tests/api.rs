//! End-to-end tests over the router with an in-memory SQLite database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode, header},
};
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, PaginatorTrait, Set, sea_query::Expr,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use unicorn::{
    AppState, app,
    auth::API_KEY_HEADER,
    config::Config,
    db,
    entities::{
        external_review, generated_opinion, genre, movie,
        opinion_vote::{self, ONE_OPINION_RULE, VoteTarget, VoteType},
        user_opinion,
    },
    error::AppError,
    models::{MovieCreate, OpinionCreate},
    sampling::{FALLBACK_OPINION, TEMPLATE_METHOD},
    store::Store,
};

const API_KEY: &str = "test-key";
const PEER: ([u8; 4], u16) = ([203, 0, 113, 7], 4242);

async fn test_app() -> (Router, Store) {
    let conn = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    let store = Store::new(conn);
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        api_key: API_KEY.to_string(),
    };
    let state = Arc::new(AppState { config: Arc::new(config), store: store.clone() });
    let router = app(state).layer(MockConnectInfo(SocketAddr::from(PEER)));
    (router, store)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    key: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        req = req.header(API_KEY_HEADER, key);
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body), Some(API_KEY)).await
}

async fn seed_movie(store: &Store, body: Value) -> movie::Model {
    let req: MovieCreate = serde_json::from_value(body).unwrap();
    store.create_movie(&req).await.unwrap().0
}

async fn seed_opinion(store: &Store, movie_id: i32, content: &str, score: f64) -> i32 {
    store.add_generated_opinion(movie_id, content, score, None).await.unwrap().0.id
}

async fn seed_votes(store: &Store, opinion_id: i32, vote_type: VoteType, n: usize) {
    for _ in 0..n {
        store.cast_vote(VoteTarget::Generated(opinion_id), vote_type, None).await.unwrap();
    }
}

#[tokio::test]
async fn health_reports_database_ok() {
    let (app, _) = test_app().await;
    let (status, body) = get(&app, "/health/db").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "db": "ok" }));
}

#[tokio::test]
async fn top_opinions_break_absurdity_ties_on_net_votes() {
    let (app, store) = test_app().await;

    let interstellar = seed_movie(&store, json!({ "title": "Interstellar" })).await;
    let quiet = seed_opinion(&store, interstellar.id, "Docking scene made me seasick.", 9.0).await;

    let other = seed_movie(&store, json!({ "title": "Paddington 2" })).await;
    let loud = seed_opinion(&store, other.id, "The bear is a tax auditor.", 9.0).await;
    seed_votes(&store, loud, VoteType::Up, 3).await;
    seed_votes(&store, loud, VoteType::Down, 1).await;

    seed_opinion(&store, other.id, "Fine, honestly.", 2.5).await;

    let (status, body) = get(&app, "/opinions/top?limit=2").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["id"], loud);
    assert_eq!(rows[0]["movie_title"], "Paddington 2");
    assert_eq!(rows[0]["vote_count"], 4);
    assert_eq!(rows[0]["up_votes"], 3);
    assert_eq!(rows[0]["down_votes"], 1);

    assert_eq!(rows[1]["id"], quiet);
    assert_eq!(rows[1]["movie_title"], "Interstellar");
    for field in ["vote_count", "up_votes", "down_votes", "lol_votes", "wtf_votes"] {
        assert_eq!(rows[1][field], 0, "{field}");
    }
}

#[tokio::test]
async fn top_opinions_count_every_vote_type() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Cats" })).await;
    let opinion = seed_opinion(&store, movie.id, "The fur was load-bearing.", 9.9).await;
    seed_votes(&store, opinion, VoteType::Lol, 2).await;
    seed_votes(&store, opinion, VoteType::Wtf, 1).await;
    seed_votes(&store, opinion, VoteType::Up, 1).await;

    let (status, body) = get(&app, "/opinions/top").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], opinion);
    assert_eq!(body[0]["vote_count"], 4);
    assert_eq!(body[0]["up_votes"], 1);
    assert_eq!(body[0]["down_votes"], 0);
    assert_eq!(body[0]["lol_votes"], 2);
    assert_eq!(body[0]["wtf_votes"], 1);
}

#[tokio::test]
async fn user_opinion_votes_stay_out_of_top_counts() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat" })).await;
    let generated = seed_opinion(&store, movie.id, "Too much coffee.", 6.0).await;
    let req = OpinionCreate { author_name: None, content: "Great shootout.".to_string() };
    let (user, _) = store.add_user_opinion(movie.id, &req).await.unwrap();
    for _ in 0..3 {
        store.cast_vote(VoteTarget::User(user.id), VoteType::Up, None).await.unwrap();
    }

    let (status, body) = get(&app, "/opinions/top").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], generated);
    assert_eq!(rows[0]["vote_count"], 0);
    assert_eq!(rows[0]["up_votes"], 0);
}

#[tokio::test]
async fn top_opinions_empty_and_limit_bounds() {
    let (app, _) = test_app().await;

    let (status, body) = get(&app, "/opinions/top").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/opinions/top?limit=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = get(&app, "/opinions/top?limit=101").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_movie_links_genres() {
    let (app, _) = test_app().await;

    let (status, body) = post(
        &app,
        "/movie",
        json!({
            "title": "  Interstellar ",
            "release_date": "2014-11-07",
            "runtime": 169,
            "genres": ["Science Fiction", "Drama", "Drama"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Interstellar");
    assert_eq!(body["release_date"], "2014-11-07");

    let names: Vec<&str> =
        body["genres"].as_array().unwrap().iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Drama", "Science Fiction"]);

    let (status, _) = post(&app, "/movie/", json!({ "title": "Tenet", "genres": ["Drama"] })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_title_or_original_title_conflicts() {
    let (app, store) = test_app().await;
    seed_movie(
        &store,
        json!({ "title": "Amelie", "original_title": "Le Fabuleux Destin d'Amelie Poulain" }),
    )
    .await;

    let (status, body) = post(&app, "/movie", json!({ "title": "Amelie" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) =
        post(&app, "/movie", json!({ "title": "Le Fabuleux Destin d'Amelie Poulain" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(movie::Entity::find().count(store.db()).await.unwrap(), 1);
}

#[tokio::test]
async fn create_movie_rejects_invalid_fields() {
    let (app, _) = test_app().await;

    let (status, _) = post(&app, "/movie", json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/movie", json!({ "title": "Heat", "runtime": 0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) =
        post(&app, "/movie", json!({ "title": "Heat", "release_date": "1995/12/15" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post(&app, "/movie", json!({ "title": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn saving_a_movie_touches_updated_at() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat" })).await;
    assert!(movie.updated_at > 0);

    // Bulk updates skip the hooks, which lets the stored value go stale.
    movie::Entity::update_many()
        .col_expr(movie::Column::UpdatedAt, Expr::value(0i64))
        .exec(store.db())
        .await
        .unwrap();
    let stale = movie::Entity::find_by_id(movie.id).one(store.db()).await.unwrap().unwrap();
    assert_eq!(stale.updated_at, 0);

    let mut active = stale.into_active_model();
    active.title = Set("Heat Redux".to_string());
    let saved = active.update(store.db()).await.unwrap();
    assert!(saved.updated_at > 0);
    assert_eq!(saved.created_at, movie.created_at);

    let (status, body) = get(&app, "/movie/search?q=redux").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], movie.id);
}

#[tokio::test]
async fn duplicate_unique_value_hides_driver_detail() {
    let (_, store) = test_app().await;
    let drama = || genre::ActiveModel { name: Set("Drama".to_string()), ..Default::default() };

    drama().insert(store.db()).await.unwrap();
    let err = drama().insert(store.db()).await.unwrap_err();

    let err = AppError::from(err);
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(!err.to_string().contains("genres.name"));
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let (app, store) = test_app().await;
    seed_movie(&store, json!({ "title": "Interstellar", "genres": ["Drama"] })).await;
    seed_movie(&store, json!({ "title": "Paddington 2" })).await;

    let (status, body) = get(&app, "/movie/search?q=zzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = get(&app, "/movie/search?q=STELLAR").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Interstellar");
    assert_eq!(rows[0]["genres"][0]["name"], "Drama");

    let (status, _) = get(&app, "/movie/search?q=%20%20").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(&app, "/movie/search?q=a&limit=51").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_matches_original_title() {
    let (app, store) = test_app().await;
    seed_movie(
        &store,
        json!({ "title": "Amelie", "original_title": "Le Fabuleux Destin d'Amélie Poulain" }),
    )
    .await;
    seed_movie(&store, json!({ "title": "Heat" })).await;

    let (status, body) = get(&app, "/movie/search?q=fabuleux").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Amelie");

    // "AMÉLIE"
    let (status, body) = get(&app, "/movie/search?q=AM%C3%89LIE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Amelie");
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let (app, store) = test_app().await;
    seed_movie(&store, json!({ "title": "ÉLITE" })).await;
    seed_movie(&store, json!({ "title": "Interstellar" })).await;

    // "ÉLITE", then "élite"
    for uri in ["/movie/search?q=%C3%89LITE", "/movie/search?q=%C3%A9lite"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1, "{uri}");
        assert_eq!(rows[0]["title"], "ÉLITE");
    }
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let (app, store) = test_app().await;
    seed_movie(&store, json!({ "title": "Interstellar" })).await;
    seed_movie(&store, json!({ "title": "Paddington 2" })).await;

    for uri in ["/movie/search?q=%25", "/movie/search?q=_", "/movie/search?q=%5C"] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    seed_movie(&store, json!({ "title": "100% Wolf" })).await;
    let (status, body) = get(&app, "/movie/search?q=%25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "100% Wolf");
}

#[tokio::test]
async fn search_respects_limit() {
    let (app, store) = test_app().await;
    for title in ["Alien", "Aliens", "Alien 3"] {
        seed_movie(&store, json!({ "title": title })).await;
    }

    let (status, body) = get(&app, "/movie/search?q=alien&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> =
        body.as_array().unwrap().iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Alien", "Alien 3"]);
}

#[tokio::test]
async fn random_movie_on_empty_catalog_is_not_found() {
    let (app, _) = test_app().await;
    let (status, body) = get(&app, "/movie/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No movies found in database");
}

#[tokio::test]
async fn random_movie_falls_back_without_opinions() {
    let (app, store) = test_app().await;
    seed_movie(&store, json!({ "title": "Interstellar", "genres": ["Drama"] })).await;

    let (status, body) = get(&app, "/movie/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Interstellar");
    assert_eq!(body["genres"], json!(["Drama"]));
    assert_eq!(body["real_review"], Value::Null);
    assert_eq!(body["fake_opinion"], FALLBACK_OPINION);
}

#[tokio::test]
async fn movie_detail_samples_reviews_and_opinions() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Interstellar" })).await;
    seed_opinion(&store, movie.id, "Corn fields are the real villain.", 8.0).await;

    let (status, body) = post(
        &app,
        &format!("/movie/{}/review", movie.id),
        json!({ "content": "Long, loud and lovely." }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["source"], "user");
    assert_eq!(body["author"], "Anonymous");
    assert_eq!(body["movie_title"], "Interstellar");

    let (status, body) = get(&app, &format!("/movie/{}", movie.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], movie.id);
    assert_eq!(body["real_review"], "Long, loud and lovely.");
    assert_eq!(body["fake_opinion"], "Corn fields are the real villain.");

    let (status, _) = get(&app, "/movie/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn short_review_is_rejected() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat" })).await;

    let (status, _) =
        post(&app, &format!("/movie/{}/review", movie.id), json!({ "content": "meh" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn opinions_on_missing_movie_are_not_found() {
    let (app, _) = test_app().await;

    let (status, _) = post(&app, "/movie/42/opinion", json!({ "content": "Wow." })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/movie/42/absurd-opinion",
        json!({ "content": "Wow.", "absurdity_score": 5.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn absurd_opinions_manual_and_generated() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Cats" })).await;

    let (status, body) = post(
        &app,
        &format!("/movie/{}/absurd-opinion", movie.id),
        json!({ "content": "The fur was load-bearing.", "absurdity_score": 9.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["generation_method"], "manual");
    assert_eq!(body["absurdity_score"], 9.5);

    let (status, _) = post(
        &app,
        &format!("/movie/{}/absurd-opinion", movie.id),
        json!({ "content": "Too much.", "absurdity_score": 10.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/movie/{}/absurd-opinion/generate", movie.id),
        None,
        Some(API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["generation_method"], TEMPLATE_METHOD);
    let score = body["absurdity_score"].as_f64().unwrap();
    assert!((7.0..10.0).contains(&score));

    assert_eq!(generated_opinion::Entity::find().count(store.db()).await.unwrap(), 2);
}

#[tokio::test]
async fn write_endpoints_require_the_api_key() {
    let (app, _) = test_app().await;
    let body = json!({ "title": "Heat" });

    let (status, res) = send(&app, "POST", "/movie", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(res["error"]["code"], "UNAUTHORIZED");

    let (status, res) = send(&app, "POST", "/movie", Some(body), Some("nope")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(res["error"]["code"], "FORBIDDEN");

    let (status, _) = send(&app, "DELETE", "/movie/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/opinions/top").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn vote_defaults_voter_to_peer_address() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Interstellar" })).await;
    let opinion = seed_opinion(&store, movie.id, "Too much corn.", 8.0).await;

    let (status, body) =
        post(&app, &format!("/vote/opinion/{opinion}"), json!({ "vote_type": "lol" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["opinion_id"], opinion);
    assert_eq!(body["opinion_kind"], "generated");
    assert_eq!(body["vote_type"], "lol");
    assert_eq!(body["voter_identifier"], "203.0.113.7");
    assert_eq!(body["message"], "Your LOL vote has been registered!");

    let (status, body) = post(
        &app,
        &format!("/vote/opinion/{opinion}"),
        json!({ "vote_type": "wtf", "voter_identifier": "session-abc" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["voter_identifier"], "session-abc");
}

#[tokio::test]
async fn vote_on_user_opinion_sets_only_user_reference() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat" })).await;
    let req = OpinionCreate { author_name: None, content: "Coffee shop scene slaps.".to_string() };
    let (opinion, _) = store.add_user_opinion(movie.id, &req).await.unwrap();

    let (status, body) =
        post(&app, &format!("/vote/user-opinion/{}", opinion.id), json!({ "vote_type": "up" }))
            .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["opinion_kind"], "user");

    let vote = opinion_vote::Entity::find_by_id(body["id"].as_i64().unwrap() as i32)
        .one(store.db())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vote.generated_opinion_id, None);
    assert_eq!(vote.user_opinion_id, Some(opinion.id));
}

#[tokio::test]
async fn vote_on_missing_opinion_is_not_found() {
    let (app, _) = test_app().await;

    let (status, body) = post(&app, "/vote/opinion/7", json!({ "vote_type": "up" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Generated opinion with id 7 not found");

    let (status, _) = post(&app, "/vote/user-opinion/7", json!({ "vote_type": "up" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_rejects_votes_on_both_or_neither_opinion() {
    let (_, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat" })).await;
    let generated = seed_opinion(&store, movie.id, "Too much coffee.", 6.0).await;
    let req = OpinionCreate { author_name: None, content: "Great shootout.".to_string() };
    let (user, _) = store.add_user_opinion(movie.id, &req).await.unwrap();

    for (generated_opinion_id, user_opinion_id) in [(Some(generated), Some(user.id)), (None, None)]
    {
        let row = opinion_vote::ActiveModel {
            generated_opinion_id: Set(generated_opinion_id),
            user_opinion_id: Set(user_opinion_id),
            vote_type: Set(VoteType::Up),
            voter_identifier: Set(None),
            created_at: Set(0),
            ..Default::default()
        };
        // Entity::insert skips the active-model hooks, so this reaches the
        // check constraint.
        let err = opinion_vote::Entity::insert(row).exec(store.db()).await.unwrap_err();
        assert!(err.to_string().contains(ONE_OPINION_RULE), "{err}");
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    assert_eq!(opinion_vote::Entity::find().count(store.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn active_model_rejects_votes_before_storage() {
    let (_, store) = test_app().await;

    let row = opinion_vote::ActiveModel {
        generated_opinion_id: Set(None),
        user_opinion_id: Set(None),
        vote_type: Set(VoteType::Down),
        voter_identifier: Set(None),
        created_at: Set(0),
        ..Default::default()
    };
    let err = row.insert(store.db()).await.unwrap_err();
    match AppError::from(err) {
        AppError::Validation(message) => assert!(message.contains(ONE_OPINION_RULE)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn deleting_a_movie_cascades() {
    let (app, store) = test_app().await;
    let movie = seed_movie(&store, json!({ "title": "Heat", "genres": ["Crime"] })).await;
    let generated = seed_opinion(&store, movie.id, "Too much coffee.", 6.0).await;
    let req = OpinionCreate { author_name: Some("Vincent".into()), content: "Iconic.".into() };
    let (user, _) = store.add_user_opinion(movie.id, &req).await.unwrap();
    seed_votes(&store, generated, VoteType::Up, 2).await;
    store.cast_vote(VoteTarget::User(user.id), VoteType::Wtf, None).await.unwrap();

    let (status, _) = post(
        &app,
        &format!("/movie/{}/review", movie.id),
        json!({ "content": "Still the best diner scene." }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send(&app, "DELETE", &format!("/movie/{}", movie.id), None, Some(API_KEY)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let db = store.db();
    assert_eq!(movie::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(generated_opinion::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(user_opinion::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(external_review::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(opinion_vote::Entity::find().count(db).await.unwrap(), 0);

    let (status, _) =
        send(&app, "DELETE", &format!("/movie/{}", movie.id), None, Some(API_KEY)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
