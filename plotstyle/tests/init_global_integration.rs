use claims::*;
use plotstyle::{StyleError, StyleManager, StyleOverrides, StyleSettings, set_project_style, with_plot_state};

// Single test: the global manager can only be initialized once per process
#[test]
fn test_init_global_with_explicit_settings() {
    let settings = StyleSettings::default().with_colormap_prefix("lab_");
    assert_ok!(StyleManager::init_global(settings));

    let err = assert_err!(StyleManager::init_global(StyleSettings::default()));
    assert!(matches!(err, StyleError::State { .. }));

    assert_ok!(set_project_style("default", StyleOverrides::none()));
    let (custom, stock) = assert_ok!(with_plot_state(|state| (
        state.colormap("lab_default").is_some(),
        state.colormap("project_default").is_some(),
    )));

    assert!(custom);
    assert!(!stock);
}
