use super::*;

fn shop() -> ShopDomain {
    ShopDomain::parse("acme.myshopify.com").unwrap()
}

#[test]
fn customer_search_url_encodes_plus_and_at() {
    let url =
        urls::customer_search_url("https", &shop(), "2024-07", "jane+vip@example.com").unwrap();
    assert_eq!(
        url.as_str(),
        "https://acme.myshopify.com/admin/api/2024-07/customers/search.json?query=email:jane%2Bvip%40example.com"
    );
}

#[test]
fn customer_search_url_round_trips_email_through_query_decoding() {
    let email = "o'brien+tag@sub.example.co.uk";
    let url = urls::customer_search_url("https", &shop(), "2024-07", email).unwrap();
    let query = url
        .query_pairs()
        .find(|(k, _)| *k == "query")
        .map(|(_, v)| v.into_owned());
    assert_eq!(query, Some(format!("email:{email}")));
}

#[test]
fn customer_search_url_escapes_query_delimiters() {
    let url =
        urls::customer_search_url("https", &shop(), "2024-07", "a&b=c#d@example.com").unwrap();
    assert_eq!(url.query_pairs().count(), 1);
    assert!(url.fragment().is_none());
}

#[test]
fn encode_component_keeps_unreserved_marks() {
    assert_eq!(urls::encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    assert_eq!(urls::encode_component("a b+c@d"), "a%20b%2Bc%40d");
}

#[test]
fn customer_metafields_url_uses_customer_id() {
    let url = urls::customer_metafields_url("https", &shop(), "2025-01", 207_119_551).unwrap();
    assert_eq!(
        url.as_str(),
        "https://acme.myshopify.com/admin/api/2025-01/customers/207119551/metafields.json"
    );
}

#[test]
fn admin_base_honours_scheme_and_port() {
    let local = ShopDomain::parse("127.0.0.1:9000").unwrap();
    assert_eq!(
        urls::admin_base("http", &local, "2024-07"),
        "http://127.0.0.1:9000/admin/api/2024-07"
    );
}
