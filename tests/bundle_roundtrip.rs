use portal_quest::levels::{builtin_levels, builtin_pack};
use portal_quest::persistence::{BUNDLE_VERSION, Bundle, load_bundle, save_bundle};
use portal_quest::sim::Level;

#[test]
fn builtin_pack_survives_export_and_import() {
    let pack = builtin_pack();
    let json = Bundle::from_pack(pack.clone()).to_json().unwrap();
    let imported = Bundle::from_json(&json).unwrap();
    assert_eq!(imported.version(), BUNDLE_VERSION);
    assert_eq!(imported.into_pack(), pack);
}

#[test]
fn each_level_survives_a_single_level_bundle() {
    for level in builtin_levels() {
        let json = Bundle::from_level(level.clone()).to_json().unwrap();
        let pack = Bundle::from_json(&json).unwrap().into_pack();
        assert_eq!(pack.levels, vec![level]);
    }
}

#[test]
fn exported_json_uses_tagged_shapes() {
    let json = Bundle::from_pack(builtin_pack()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["type"], "portal");
    assert_eq!(value["version"], BUNDLE_VERSION);
    let levels = value["levels"].as_array().unwrap();
    assert_eq!(levels[0]["enemies"][0]["type"], "patrol");
    assert_eq!(levels[1]["doors"][0]["type"], "key");
    assert_eq!(levels[1]["doors"][0]["keyId"], "gold");
    assert_eq!(levels[2]["switches"][0]["doorIds"][0], "gate");
    assert_eq!(levels[2]["enemies"][0]["orbitRadius"], 70.0);
}

#[test]
fn sparse_level_json_loads_with_defaults() {
    let json = r#"{
        "type": "level",
        "version": 1,
        "level": {
            "id": "sketch",
            "start": [20, 20],
            "doors": [{"type": "switch", "rect": {"x": 50, "y": 0, "w": 20, "h": 80}}],
            "switches": [{"rect": {"x": 10, "y": 10, "w": 30, "h": 30}}]
        }
    }"#;
    let pack = Bundle::from_json(json).unwrap().into_pack();
    let level: &Level = &pack.levels[0];
    assert!(level.enemies.is_empty());
    assert!(level.portal.is_none());
    assert!(level.doors[0].is_closed_switch_door());
    assert!(level.switches[0].door_ids.is_empty());
}

#[test]
fn bundle_file_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "portal-quest-bundle-{}.json",
        std::process::id()
    ));
    let bundle = Bundle::from_pack(builtin_pack());
    save_bundle(&path, &bundle).unwrap();
    let loaded = load_bundle(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, bundle);
}
