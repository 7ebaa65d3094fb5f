// tests/discussion_workflow.rs
use folio_core::application::{
    dto::{ArticleExtensionDto, ArticleInput},
    error::ApplicationError,
};
use folio_core::domain::article::{ArticleKind, MediaSlot};

mod support;

use support::{TestHarness, actor, png};

#[tokio::test]
async fn create_defaults_to_open_discussion() {
    let harness = TestHarness::new();
    let created = harness
        .discussions()
        .create(
            &actor(),
            ArticleInput::default()
                .title("Which editor?")
                .lead("Pick one")
                .body("  vim or emacs  ")
                .tags(vec![2]),
        )
        .await
        .unwrap();

    assert_eq!(created.kind, ArticleKind::Discussion);
    assert_eq!(created.lead.as_deref(), Some("Pick one"));
    assert_eq!(created.tags, vec![2]);
    assert_eq!(
        created.extension,
        ArticleExtensionDto::Discussion {
            body: Some("vim or emacs".into()),
            closed: false,
        }
    );

    let listed = harness.discussions().list(1, 10).await.unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].closed, Some(false));
    assert!(listed.items[0].featured_img.is_none());
}

/// ディスカッションは画像スロットを持たないためアップロードは無視される
#[tokio::test]
async fn uploads_are_ignored_for_discussions() {
    let harness = TestHarness::new();
    harness
        .discussions()
        .create(
            &actor(),
            ArticleInput::default()
                .title("No pictures")
                .media(MediaSlot::FeaturedImage, png(b"ignored")),
        )
        .await
        .unwrap();

    assert!(harness.media.calls().is_empty());
}

#[tokio::test]
async fn body_limit_is_kind_specific() {
    let harness = TestHarness::new();
    let long_body = "x".repeat(10_001);

    let err = harness
        .discussions()
        .create(&actor(), ArticleInput::default().title("Long").body(long_body.clone()))
        .await
        .unwrap_err();
    let ApplicationError::ValidationFailed(fields) = err else {
        panic!("expected field errors, got {err:?}");
    };
    assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["body"]);

    let post = harness
        .posts()
        .create(&actor(), ArticleInput::default().title("Long").body(long_body))
        .await;
    assert!(post.is_ok());
}

#[tokio::test]
async fn update_can_close_and_replaces_fields() {
    let harness = TestHarness::new();
    let discussions = harness.discussions();
    let created = discussions
        .create(
            &actor(),
            ArticleInput::default()
                .title("Open question")
                .body("details")
                .tags(vec![1, 3]),
        )
        .await
        .unwrap();

    let updated = discussions
        .update(
            ArticleInput::default()
                .title("Answered question")
                .closed(true)
                .tags(vec![3]),
            &created.id,
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.author_id, created.author_id);
    assert_eq!(updated.slug, "answered-question");
    assert_eq!(updated.tags, vec![3]);
    assert_eq!(
        updated.extension,
        ArticleExtensionDto::Discussion {
            body: None,
            closed: true,
        }
    );

    let fetched = discussions.get_by_slug("answered-question").await.unwrap();
    assert_eq!(fetched.extension, updated.extension);
    assert_eq!(fetched.tags, vec![3]);
}

#[tokio::test]
async fn update_of_missing_discussion_is_not_found() {
    let harness = TestHarness::new();
    let err = harness
        .discussions()
        .update(
            ArticleInput::default().title("Ghost"),
            "6ccd780c-baba-1026-9564-5b8c656024db",
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(harness.store.article_count(), 0);
}
