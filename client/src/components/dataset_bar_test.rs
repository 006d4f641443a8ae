use super::*;
use grid::{Endpoint, GridConfig};

#[test]
fn active_tab_gets_modifier_class() {
    assert_eq!(resource_tab_class(true), "btn dataset-bar__tab dataset-bar__tab--active");
    assert_eq!(resource_tab_class(false), "btn dataset-bar__tab");
}

#[test]
fn only_the_displayed_resource_is_active() {
    let mut session = GridSession::new(GridConfig::default());
    assert!(!is_active(&session, "datos"));
    session.apply_dataset(Endpoint::named("usuarios").unwrap(), &[], Vec::new());
    assert!(is_active(&session, "usuarios"));
    assert!(!is_active(&session, "datos"));
}
