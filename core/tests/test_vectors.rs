//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use movie_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Movie, MovieClient, MovieFilter, MovieId,
    MovieInput,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> MovieClient {
    MovieClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_filter(s: &str) -> MovieFilter {
    match s {
        "all" => MovieFilter::All,
        "trending" => MovieFilter::Trending,
        "top_rated" => MovieFilter::TopRated,
        other => panic!("unknown filter: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    let method = parse_method(expected["method"].as_str().unwrap());
    assert_eq!(req.method, method, "{name}: method");
    let path = format!("{BASE_URL}{}", expected["path"].as_str().unwrap());
    assert_eq!(req.path, path, "{name}: path");
}

fn request_body(req: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
}

fn check_error(name: &str, case: &serde_json::Value, err: ApiError) {
    match case["expected_error"].as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let filter = parse_filter(case["filter"].as_str().unwrap());
        let expected_req = &case["expected_request"];

        let req = c.build_list_movies(filter);
        check_request(name, &req, expected_req);
        assert!(req.body.is_none(), "{name}: body should be None");

        let movies = c.parse_list_movies(simulated(case)).unwrap();
        let expected: Vec<Movie> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(movies, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = MovieId::new(case["input_id"].as_str().unwrap());
        let expected_req = &case["expected_request"];

        let req = c.build_get_movie(&id);
        check_request(name, &req, expected_req);

        let result = c.parse_get_movie(simulated(case));
        if case.get("expected_error").is_some() {
            check_error(name, case, result.unwrap_err());
        } else {
            let expected: Movie = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: MovieInput = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_movie(&input).unwrap();
        check_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        assert_eq!(request_body(&req), expected_req["body"], "{name}: body");

        let movie = c.parse_create_movie(simulated(case)).unwrap();
        let expected: Movie = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(movie, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = MovieId::new(case["input_id"].as_str().unwrap());
        let input: MovieInput = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_update_movie(&id, &input).unwrap();
        check_request(name, &req, expected_req);

        assert_eq!(request_body(&req), expected_req["body"], "{name}: body");

        let movie = c.parse_update_movie(simulated(case)).unwrap();
        let expected: Movie = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(movie, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = MovieId::new(case["input_id"].as_str().unwrap());
        let expected_req = &case["expected_request"];

        let req = c.build_delete_movie(&id);
        check_request(name, &req, expected_req);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_delete_movie(simulated(case));
        if case.get("expected_error").is_some() {
            check_error(name, case, result.unwrap_err());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
