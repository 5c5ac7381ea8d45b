mod common;

use api::media::{MediaError, MediaStore, UploadKind};
use entity::{csr_report, initiative};
use sea_orm::EntityTrait;
use uuid::Uuid;

use common::setup;

#[tokio::test]
async fn upload_stores_the_file_and_links_the_record() {
    let env = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());
    let record = env.initiative("Clean Water", initiative::Status::Planned).await;

    let stored = store
        .upload(
            env.db.as_ref(),
            UploadKind::InitiativeDocument,
            record.id,
            "site survey.xlsx",
            b"rows",
        )
        .await
        .unwrap();
    assert!(stored.path.starts_with("initiative_docs/"));
    assert!(stored.path.ends_with("_site_survey.xlsx"));
    assert_eq!(stored.size, 4);
    assert_eq!(
        tokio::fs::read(dir.path().join(&stored.path)).await.unwrap(),
        b"rows"
    );

    let reloaded = initiative::Entity::find_by_id(record.id)
        .one(env.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.attachments.as_deref(), Some(stored.path.as_str()));
}

#[tokio::test]
async fn missing_owner_discards_the_file() {
    let env = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());

    let err = store
        .upload(
            env.db.as_ref(),
            UploadKind::InitiativeDocument,
            Uuid::new_v4(),
            "plan.pdf",
            b"%PDF",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotFound("Initiative")));

    let mut entries = tokio::fs::read_dir(dir.path().join("initiative_docs"))
        .await
        .unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn rejected_files_never_touch_disk() {
    let env = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());

    let err = store
        .upload(
            env.db.as_ref(),
            UploadKind::StudentPhoto,
            Uuid::new_v4(),
            "photo.bmp",
            b"BM",
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "File extension 'bmp' is not allowed. Allowed extensions are: jpg, jpeg, png, gif, webp"
    );
    assert!(!dir.path().join("student_photos").exists());
}

#[tokio::test]
async fn report_files_attach_to_their_report() {
    let env = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());
    let parent = env.initiative("Skilling", initiative::Status::InProgress).await;
    let report = env.csr_report(parent.id).await;

    let stored = store
        .upload(
            env.db.as_ref(),
            "csr-report".parse().unwrap(),
            report.id,
            "q1 report.pptx",
            b"slides",
        )
        .await
        .unwrap();
    assert!(stored.path.starts_with("csr_reports/"));
    let reloaded = csr_report::Entity::find_by_id(report.id)
        .one(env.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.report_file.as_deref(), Some(stored.path.as_str()));

    let err = store
        .upload(
            env.db.as_ref(),
            UploadKind::ProgressReport,
            report.id,
            "q1.pdf",
            b"%PDF",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotFound("Progress report")));
}
