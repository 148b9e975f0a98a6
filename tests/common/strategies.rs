use proptest::prelude::*;

/// Strategy for search-cluster resource names such as `radio/artists`
pub fn resource_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,20}(/[a-z][a-z0-9_-]{0,20})?"
}

/// Strategy for one caller-supplied table property like `'es.mapping.id'='id'`
pub fn extra_property_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z.]{0,15}", "[a-z0-9:_]{0,12}")
        .prop_map(|(key, value)| format!("'{key}'='{value}'"))
        .prop_filter("extras must not shadow connection properties", |p| {
            !p.starts_with("'host'") && !p.starts_with("'port'")
        })
}

pub fn extra_properties_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(extra_property_strategy(), 0..5)
}

/// Strategy for non-blank host names and addresses
pub fn host_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,10}(\\.[a-z][a-z0-9-]{0,10}){0,2}",
        (1u8..=254, 0u8..=255, 0u8..=255, 1u8..=254)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
    ]
}

/// Strategy for absent or blank host settings
pub fn blank_host_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "[ \t]{1,3}".prop_map(Some)]
}

pub fn port_strategy() -> impl Strategy<Value = String> {
    (1u16..=u16::MAX).prop_map(|p| p.to_string())
}

/// Strategy for remote mode selectors
pub fn remote_target_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(:[0-9]{2,5})?".prop_filter("local selects embedded mode", |t| t != "local")
}
