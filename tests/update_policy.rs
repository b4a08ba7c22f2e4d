mod support;

use std::sync::Arc;

use docslug::config::{RegeneratePolicy, SlugOptions};
use docslug::domain::document::DocumentReadRepository;

use support::{CountingReadRepo, TestModel, name_schema, named, slugged_model, slugged_model_with_reader};

#[tokio::test]
async fn unrelated_update_does_not_touch_slug() {
    let mut counter = None;
    let TestModel { model, .. } =
        slugged_model_with_reader(name_schema(), SlugOptions::default(), |store| {
            let counting = Arc::new(CountingReadRepo::new(store));
            counter = Some(Arc::clone(&counting));
            counting as Arc<dyn DocumentReadRepository>
        });
    let counter = counter.unwrap();

    let mut doc = model.create(named("My Model")).await.unwrap();
    assert_eq!(counter.find_many_calls(), 1);

    doc.set("description", "now with a description");
    let saved = model.save(doc).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model"));
    assert_eq!(saved.get_str("description"), Some("now with a description"));
    assert_eq!(counter.find_many_calls(), 1);
}

#[tokio::test]
async fn changing_the_source_regenerates_the_slug() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let mut doc = model.create(named("My Model")).await.unwrap();

    doc.set("name", "Fresh Name");
    let saved = model.save(doc).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("fresh-name"));
    assert!(model.find_by_slug("my-model").await.unwrap().is_none());
    assert_eq!(
        model.find_by_slug("fresh-name").await.unwrap().and_then(|d| d.id()),
        saved.id()
    );
}

#[tokio::test]
async fn renaming_within_the_same_base_keeps_the_slug() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    model.create(named("My Model")).await.unwrap();
    let mut second = model.create(named("My Model")).await.unwrap();
    assert_eq!(second.get_str("slug"), Some("my-model-2"));

    second.set("name", "my model");
    let saved = model.save(second).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model-2"));
}

#[tokio::test]
async fn renaming_onto_a_taken_base_gets_a_suffix() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    model.create(named("Other")).await.unwrap();
    let mut doc = model.create(named("My Model")).await.unwrap();

    doc.set("name", "Other");
    let saved = model.save(doc).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("other-2"));
}

#[tokio::test]
async fn a_renamed_document_never_collides_with_itself() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let mut doc = model.create(named("My Model")).await.unwrap();

    doc.set("name", "My  Model!");
    let saved = model.save(doc).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model"));
}

#[tokio::test]
async fn suffixes_continue_after_a_rename() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let mut first = model.create(named("My Model")).await.unwrap();
    model.create(named("My Model")).await.unwrap();

    first.set("name", "Something Else");
    model.save(first).await.unwrap();
    let third = model.create(named("My Model")).await.unwrap();

    assert_eq!(third.get_str("slug"), Some("my-model-3"));
}

#[tokio::test]
async fn on_source_change_keeps_a_hand_written_slug() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    model.create(named("My Model")).await.unwrap();
    let mut doc = model.create(named("My Model")).await.unwrap();

    doc.set("slug", "hand-written");
    let mut saved = model.save(doc).await.unwrap();
    saved.set("description", "touched");
    let saved = model.save(saved).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("hand-written"));
}

#[tokio::test]
async fn always_policy_overwrites_a_hand_written_slug() {
    let options = SlugOptions::default().with_regenerate(RegeneratePolicy::Always);
    let TestModel { model, .. } = slugged_model(options);
    model.create(named("My Model")).await.unwrap();
    let mut doc = model.create(named("My Model")).await.unwrap();

    doc.set("slug", "hand-written");
    doc.set("description", "touched");
    let saved = model.save(doc).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model-2"));
}

#[tokio::test]
async fn always_policy_reallocates_on_every_save() {
    let options = SlugOptions::default().with_regenerate(RegeneratePolicy::Always);
    let TestModel { model, .. } = slugged_model(options);
    model.create(named("My Model")).await.unwrap();
    let mut second = model.create(named("My Model")).await.unwrap();
    model.create(named("My Model")).await.unwrap();
    assert_eq!(second.get_str("slug"), Some("my-model-2"));

    second.set("description", "touched");
    let saved = model.save(second).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model-4"));
    assert!(model.find_by_slug("my-model-2").await.unwrap().is_none());
}

#[tokio::test]
async fn a_freed_base_is_reclaimed_on_rename() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let first = model.create(named("My Model")).await.unwrap();
    let mut second = model.create(named("My Model")).await.unwrap();
    model.delete(first.id().unwrap()).await.unwrap();

    second.set("name", "My Model!");
    let saved = model.save(second).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model"));
}

#[tokio::test]
async fn a_rename_past_a_missing_base_follows_the_highest_suffix() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let first = model.create(named("My Model")).await.unwrap();
    let mut second = model.create(named("My Model")).await.unwrap();
    model.create(named("My Model")).await.unwrap();
    model.delete(first.id().unwrap()).await.unwrap();

    second.set("name", "my model");
    let saved = model.save(second).await.unwrap();

    assert_eq!(saved.get_str("slug"), Some("my-model-4"));
}

#[tokio::test]
async fn legacy_documents_without_slug_get_one_on_next_save() {
    let TestModel { model, .. } = slugged_model(SlugOptions::default());
    let mut doc = model.create(named("???")).await.unwrap();
    assert!(doc.get("slug").is_none());

    // Unrelated edit; the source is unchanged but the slug is still missing.
    doc.set("description", "still nameless");
    let doc = model.save(doc).await.unwrap();
    assert!(doc.get("slug").is_none());

    let mut doc = doc;
    doc.set("name", "Named At Last");
    let doc = model.save(doc).await.unwrap();
    assert_eq!(doc.get_str("slug"), Some("named-at-last"));
}
