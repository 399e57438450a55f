//! Integration tests for the localization cache and lookup

use async_trait::async_trait;
use fluent_localize::{
    l10n_args, FsFetcher, L10nError, L10nResult, L10nRegistry, LanguageTagSink, Localizer,
    ResourceFetcher,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use unic_langid::LanguageIdentifier;

const EN_FTL: &str = r#"
hello = Hello!
welcome = Welcome, {$name}!
item-count = You have {$count ->
    [one] {$count} item
   *[other] {$count} items
}
"#;

const IT_FTL: &str = r#"
hello = Ciao!
welcome = Benvenuto, {$name}!
"#;

/// In-memory fetcher counting how often the transport is actually hit.
struct MockFetcher {
    resources: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockFetcher {
    fn new() -> Arc<Self> {
        let mut resources = HashMap::new();
        resources.insert("en/main.ftl".to_string(), EN_FTL.to_string());
        resources.insert("it/main.ftl".to_string(), IT_FTL.to_string());
        Arc::new(Self {
            resources,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, path: &str) -> L10nResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Keep the operation in flight long enough for callers to pile up.
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| L10nError::Fetch {
                path: path.to_string(),
                message: "not found".to_string(),
            })
    }
}

struct RecordingSink {
    tags: Mutex<Vec<String>>,
}

impl LanguageTagSink for RecordingSink {
    fn set_language_tag(&self, tag: &LanguageIdentifier) {
        self.tags.lock().push(tag.to_string());
    }
}

fn tag(s: &str) -> LanguageIdentifier {
    s.parse().unwrap()
}

fn setup() -> (Arc<MockFetcher>, Localizer) {
    let fetcher = MockFetcher::new();
    let registry = Arc::new(L10nRegistry::new(
        Arc::clone(&fetcher) as Arc<dyn ResourceFetcher>
    ));
    (fetcher, Localizer::new(registry))
}

#[tokio::test]
async fn concurrent_loads_of_one_path_fetch_once() {
    let (fetcher, localizer) = setup();
    let en = tag("en-US");

    let (a, b, c) = tokio::join!(
        localizer.load_resource_for_locale("en/main.ftl", Some(&en)),
        localizer.load_resource_for_locale("en/main.ftl", Some(&en)),
        localizer.load_resource_for_locale("en/main.ftl", Some(&en)),
    );
    let bundle = a.unwrap();
    assert!(Arc::ptr_eq(&bundle, &b.unwrap()));
    assert!(Arc::ptr_eq(&bundle, &c.unwrap()));
    assert_eq!(fetcher.calls(), 1);

    // Callers after settlement reuse the cached resource as well.
    localizer
        .load_resource_for_locale("en/main.ftl", Some(&en))
        .await
        .unwrap();
    assert_eq!(fetcher.calls(), 1);

    let message = localizer.localize("hello", None, Some(&en)).unwrap();
    assert_eq!(message.as_deref(), Some("Hello!"));
    assert!(localizer.registry().resources().is_cached("en/main.ftl"));
}

#[tokio::test]
async fn one_path_for_two_locales_yields_two_bundles() {
    let (fetcher, localizer) = setup();
    let en = tag("en-US");
    let it = tag("it");

    let (first, second) = tokio::join!(
        localizer.load_resource_for_locale("en/main.ftl", Some(&en)),
        localizer.load_resource_for_locale("en/main.ftl", Some(&it)),
    );
    let en_bundle = first.unwrap();
    let it_bundle = second.unwrap();

    assert!(!Arc::ptr_eq(&en_bundle, &it_bundle));
    assert_eq!(fetcher.calls(), 1);

    // Both bundles carry the same message set from the shared resource.
    let from_en = localizer.localize("hello", None, Some(&en)).unwrap();
    let from_it = localizer.localize("hello", None, Some(&it)).unwrap();
    assert_eq!(from_en.as_deref(), Some("Hello!"));
    assert_eq!(from_it.as_deref(), Some("Hello!"));
}

#[tokio::test]
async fn localize_formats_with_arguments() {
    let (_fetcher, localizer) = setup();
    let en = tag("en-US");
    localizer
        .load_resource_for_locale("en/main.ftl", Some(&en))
        .await
        .unwrap();

    let args = l10n_args!["name" => "Alice"];
    let message = localizer
        .localize("welcome", args.as_ref(), Some(&en))
        .unwrap();
    assert_eq!(message.as_deref(), Some("Welcome, Alice!"));

    let args = l10n_args!["count" => 1];
    let message = localizer
        .localize("item-count", args.as_ref(), Some(&en))
        .unwrap();
    assert_eq!(message.as_deref(), Some("You have 1 item"));

    let args = l10n_args!["count" => 5];
    let message = localizer
        .localize("item-count", args.as_ref(), Some(&en))
        .unwrap();
    assert_eq!(message.as_deref(), Some("You have 5 items"));
}

#[tokio::test]
async fn missing_keys_are_absent_not_errors() {
    let (_fetcher, localizer) = setup();
    let en = tag("en-US");
    localizer
        .load_resource_for_locale("en/main.ftl", Some(&en))
        .await
        .unwrap();

    let message = localizer.localize("nonexistent", None, Some(&en)).unwrap();
    assert!(message.is_none());
}

#[test]
fn unset_locale_fails_bundle_access_and_lookup() {
    let (_fetcher, localizer) = setup();

    assert!(matches!(
        localizer.get_locale_bundle(None),
        Err(L10nError::UnsetLocale)
    ));
    assert!(matches!(
        localizer.localize("hello", None, None),
        Err(L10nError::UnsetLocale)
    ));
}

#[tokio::test]
async fn global_locale_is_shared_across_component_types() {
    let fetcher = MockFetcher::new();
    let sink = Arc::new(RecordingSink {
        tags: Mutex::new(Vec::new()),
    });
    let registry = Arc::new(
        L10nRegistry::new(Arc::clone(&fetcher) as Arc<dyn ResourceFetcher>)
            .with_language_sink(Arc::clone(&sink) as Arc<dyn LanguageTagSink>),
    );

    // Two distinct component types sharing one registry.
    let greeting_card = Localizer::new(Arc::clone(&registry));
    let status_bar = Localizer::new(Arc::clone(&registry));

    greeting_card.set_global_locale(tag("it"));
    assert_eq!(status_bar.global_locale(), Some(tag("it")));
    assert_eq!(*sink.tags.lock(), vec!["it"]);

    // Each type resolves the shared global locale into its own bundles.
    status_bar
        .load_resource_for_locale("it/main.ftl", None)
        .await
        .unwrap();
    let message = status_bar.localize("hello", None, None).unwrap();
    assert_eq!(message.as_deref(), Some("Ciao!"));

    // The other type has its own (still empty) bundle for the same locale.
    let message = greeting_card.localize("hello", None, None).unwrap();
    assert!(message.is_none());
}

#[tokio::test]
async fn failed_fetches_stay_cached() {
    let (fetcher, localizer) = setup();
    let en = tag("en-US");

    let first = localizer
        .load_resource_for_locale("missing/main.ftl", Some(&en))
        .await;
    let second = localizer
        .load_resource_for_locale("missing/main.ftl", Some(&en))
        .await;

    assert!(matches!(first, Err(L10nError::Fetch { .. })));
    assert!(matches!(second, Err(L10nError::Fetch { .. })));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn locale_chain_orders_override_instance_global() {
    let (_fetcher, mut localizer) = setup();
    let en = tag("en-US");
    let it = tag("it");

    localizer
        .load_resource_for_locale("en/main.ftl", Some(&en))
        .await
        .unwrap();
    localizer
        .load_resource_for_locale("it/main.ftl", Some(&it))
        .await
        .unwrap();

    localizer.set_global_locale(en.clone());
    assert_eq!(
        localizer.localize("hello", None, None).unwrap().as_deref(),
        Some("Hello!")
    );

    localizer.set_locale(it.clone()).unwrap();
    assert_eq!(
        localizer.localize("hello", None, None).unwrap().as_deref(),
        Some("Ciao!")
    );

    // An explicit locale still beats the instance locale.
    assert_eq!(
        localizer
            .localize("hello", None, Some(&en))
            .unwrap()
            .as_deref(),
        Some("Hello!")
    );
}

#[tokio::test]
async fn fs_fetcher_drives_the_full_stack() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(temp_dir.path().join("en")).unwrap();
    fs::write(temp_dir.path().join("en/main.ftl"), EN_FTL).unwrap();

    let registry = Arc::new(L10nRegistry::new(Arc::new(FsFetcher::new(temp_dir.path()))));
    let localizer = Localizer::new(registry);
    localizer.set_global_locale(tag("en-US"));

    localizer
        .load_resource_for_locale("en/main.ftl", None)
        .await
        .unwrap();

    let args = l10n_args!["name" => "Alice"];
    let message = localizer.localize("welcome", args.as_ref(), None).unwrap();
    assert_eq!(message.as_deref(), Some("Welcome, Alice!"));
}
