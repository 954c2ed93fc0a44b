use nbv_menu::{
    find_version_entry, write_submenu, ConfigDocument, MenuItem, Tag, VersionMenu, VersionNumber,
};
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

fn sibling(label: &str, href: &str) -> Value {
    let mut map = Mapping::new();
    map.insert(Value::from("text"), Value::from(label));
    map.insert(Value::from("href"), Value::from(href));
    Value::Mapping(map)
}

fn document_with(before: &[(String, String)], after: &[(String, String)]) -> ConfigDocument {
    let mut left: Vec<Value> = before.iter().map(|(t, h)| sibling(t, h)).collect();
    let mut entry = Mapping::new();
    entry.insert(Value::from("text"), Value::from("version-control"));
    entry.insert(Value::from("menu"), Value::Sequence(vec![]));
    left.push(Value::Mapping(entry));
    left.extend(after.iter().map(|(t, h)| sibling(t, h)));

    let mut navbar = Mapping::new();
    navbar.insert(Value::from("left"), Value::Sequence(left));
    let mut website = Mapping::new();
    website.insert(Value::from("title"), Value::from("Publication"));
    website.insert(Value::from("navbar"), Value::Mapping(navbar));
    let mut root = Mapping::new();
    root.insert(Value::from("website"), Value::Mapping(website));
    root.insert(Value::from("lang"), Value::from("en"));
    ConfigDocument::from_value(Value::Mapping(root)).unwrap()
}

/// Archived entry with its keys in the generated order and mixed value types
fn archived(keys: &[(String, u8)], version: u32) -> Value {
    let mut map = Mapping::new();
    for (key, kind) in keys {
        let value = match kind {
            0 => Value::Null,
            1 => Value::from(u64::from(version)),
            2 => Value::from(true),
            _ => Value::from(format!("{key}-{version}")),
        };
        map.insert(Value::from(key.as_str()), value);
    }
    map.insert(Value::from("text"), Value::from(format!("v{version:02}")));
    Value::Mapping(map)
}

fn keys_of(value: &Value) -> Vec<String> {
    value
        .as_mapping()
        .map(|m| m.keys().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,12}".prop_filter("no marker", |s| !s.contains("version-control"))
}

proptest! {
    #[test]
    fn prop_write_submenu_preserves_siblings(
        before in proptest::collection::vec((label(), "[a-z]{1,8}\\.qmd"), 0..5),
        after in proptest::collection::vec((label(), "[a-z]{1,8}\\.qmd"), 0..5),
        versions in proptest::collection::vec(1u32..200, 1..8),
    ) {
        let original = document_with(&before, &after);
        let mut edited = original.clone();

        let items: Vec<MenuItem> = versions
            .iter()
            .map(|v| MenuItem::link(format!("v{v:02}"), format!("index_v{v:02}.ipynb")))
            .collect();
        write_submenu(&mut edited, &items).unwrap();

        let entry = find_version_entry(&edited).unwrap();
        prop_assert_eq!(entry.menu, Some(items));

        let old = original.navbar_items().unwrap();
        let new = edited.navbar_items().unwrap();
        prop_assert_eq!(old.len(), new.len());
        for (index, (a, b)) in old.iter().zip(new.iter()).enumerate() {
            if index != before.len() {
                prop_assert_eq!(a, b);
            }
        }
        prop_assert_eq!(original.root().get("lang"), edited.root().get("lang"));
        prop_assert_eq!(
            original.root()["website"].get("title"),
            edited.root()["website"].get("title")
        );
    }

    #[test]
    fn prop_bumped_submenu_survives_yaml_text(
        current in 1u32..90,
        archive in proptest::collection::vec(
            proptest::collection::vec(("[a-z]{2,6}".prop_filter("reserved", |k: &String| k.as_str() != "text"), 0u8..4), 0..4),
            0..6,
        ),
    ) {
        let mut document = document_with(&[("Home".into(), "index.qmd".into())], &[]);
        let mut existing = vec![MenuItem::link(format!("v{current:02} (latest)"), "index.ipynb").to_value().unwrap()];
        existing.extend(archive.iter().enumerate().map(|(i, keys)| archived(keys, current - 1 - (i as u32).min(current - 1))));
        let menu = VersionMenu::default();
        menu.write_raw_submenu(&mut document, existing.clone()).unwrap();

        let version = menu.latest_version(&document).unwrap();
        prop_assert_eq!(version, VersionNumber::new(current));
        let submenu = menu
            .bumped_submenu(version, version.next().unwrap(), menu.raw_submenu(&document).unwrap(), "index.ipynb")
            .unwrap();
        menu.write_raw_submenu(&mut document, submenu).unwrap();

        let reparsed = ConfigDocument::parse(&document.to_yaml_string().unwrap()).unwrap();
        let written = menu.raw_submenu(&reparsed).unwrap();
        prop_assert_eq!(written.len(), existing.len() + 1);
        prop_assert_eq!(&written[2..], &existing[1..]);
        for (new, old) in written[2..].iter().zip(&existing[1..]) {
            prop_assert_eq!(keys_of(new), keys_of(old));
        }
        let latest_label = format!("v{:02} (latest)", current + 1);
        prop_assert_eq!(written[0].get("text").and_then(Value::as_str), Some(latest_label.as_str()));
    }

    #[test]
    fn prop_history_items_descending(numbers in proptest::collection::btree_set(0u32..500, 1..20)) {
        let tags: Vec<Tag> = numbers.iter().rev().map(|n| Tag::new(format!("v{n}"))).collect();
        let items = VersionMenu::default().history_items(&tags, "index.ipynb");

        prop_assert_eq!(items.len(), numbers.len());
        let newest = numbers.iter().max().unwrap();
        prop_assert_eq!(items[0].label(), format!("v{newest} (latest)"));

        let parsed: Vec<u32> = items
            .iter()
            .map(|item| item.label().split_whitespace().next().unwrap()[1..].parse().unwrap())
            .collect();
        prop_assert!(parsed.windows(2).all(|w| w[0] > w[1]));
    }
}

#[test]
fn round_trip_through_yaml_text_keeps_written_menu() {
    let mut doc = document_with(&[("Home".into(), "index.qmd".into())], &[]);
    write_submenu(&mut doc, &[MenuItem::link("v02 (latest)", "index.ipynb")]).unwrap();

    let text = doc.to_yaml_string().unwrap();
    let reparsed = ConfigDocument::parse(&text).unwrap();
    assert_eq!(reparsed, doc);
}
