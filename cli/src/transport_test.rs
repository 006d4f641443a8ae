use super::*;

#[test]
fn resolve_joins_relative_paths_onto_base() {
    let transport = HttpTransport::new("http://127.0.0.1:3000/");
    assert_eq!(transport.resolve("/api/datos"), "http://127.0.0.1:3000/api/datos");
    assert_eq!(transport.resolve("api/datos/3"), "http://127.0.0.1:3000/api/datos/3");
}

#[test]
fn resolve_keeps_absolute_urls() {
    let transport = HttpTransport::new("http://127.0.0.1:3000");
    assert_eq!(transport.resolve("https://records.example/api/usuarios"), "https://records.example/api/usuarios");
}

#[test]
fn methods_map_one_to_one() {
    assert_eq!(to_reqwest(Method::Get), reqwest::Method::GET);
    assert_eq!(to_reqwest(Method::Post), reqwest::Method::POST);
    assert_eq!(to_reqwest(Method::Put), reqwest::Method::PUT);
    assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
}
