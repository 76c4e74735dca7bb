use chrono::NaiveDate;
use domain::{
    AnalysisResult, DashboardQuery, Rating, Review, ReviewStore, StorageError,
};
use infrastructure::config::{StorageBackendKind, StorageSettings};
use infrastructure::{
    export_csv_to_file, open_review_store, CsvTableBackend, SqliteTableBackend,
    TableReviewStore,
};
use tempfile::TempDir;
use tokio::fs;

fn submission(hour: u32, stars: i64, text: &str, action: &str) -> Review {
    let at = NaiveDate::from_ymd_opt(2024, 4, 12)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp");
    Review::from_submission(
        at,
        Rating::new(stars).expect("valid rating"),
        text,
        AnalysisResult::new("Thank you", format!("{text} summary"), action),
    )
}

async fn exercise_store(store: &dyn ReviewStore) {
    assert!(store.load_all().await.expect("empty load").is_empty());

    let first = submission(9, 2, "slow service", "speed up");
    let second = submission(10, 5, "great, thanks", "None");
    store.append(first.clone()).await.expect("append first");
    store.append(second.clone()).await.expect("append second");

    let rows = store.load_all().await.expect("load");
    assert_eq!(rows, vec![first.clone(), second]);

    let id = rows[0].id_at(0);
    store
        .update_action(&id, "speed up (RESOLVED)")
        .await
        .expect("update");

    let rows = store.load_all().await.expect("reload");
    assert_eq!(rows[0].action, "speed up (RESOLVED)");
    assert!(DashboardQuery::new(&rows).open_issues().is_empty());
}

#[tokio::test]
async fn test_csv_store_lifecycle() {
    let dir = TempDir::new().expect("tempdir");
    let store = TableReviewStore::new(CsvTableBackend::new(dir.path().join("reviews_data.csv")));
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_sqlite_store_lifecycle() {
    let dir = TempDir::new().expect("tempdir");
    let backend = SqliteTableBackend::open(dir.path().join("reviews.db"))
        .await
        .expect("open sqlite");
    exercise_store(&TableReviewStore::new(backend)).await;
}

#[tokio::test]
async fn test_open_review_store_honours_settings() {
    let dir = TempDir::new().expect("tempdir");
    let settings = StorageSettings {
        backend: StorageBackendKind::Sqlite,
        path: Some(dir.path().join("configured.db")),
    };

    let store = open_review_store(&settings).await.expect("open");
    store
        .append(submission(8, 3, "ok", "None"))
        .await
        .expect("append");

    assert!(dir.path().join("configured.db").exists());
}

#[tokio::test]
async fn test_reads_table_written_by_another_tool() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("reviews_data.csv");
    fs::write(
        &path,
        "timestamp,rating,review,user_response,summary,action\n\
         2024-04-10 08:00:00,4,Nice staff,Thanks!,friendly staff,None\n\
         2024-04-11 08:00:00,2.0,\"Cold food, slow\",Sorry!,cold food,Check kitchen\n\
         2024-04-11 09:00:00,,No rating,Thanks,,\n",
    )
    .await
    .expect("seed file");

    let store = TableReviewStore::new(CsvTableBackend::new(&path));
    let rows = store.load_all().await.expect("load");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].rating.as_str(), "2.0");
    assert_eq!(rows[1].review, "Cold food, slow");
    assert!(rows[2].numeric_rating().is_none());

    let metrics = DashboardQuery::new(&rows).metrics();
    assert_eq!(metrics.count, 3);
    assert_eq!(metrics.average_rating, Some(3.0));
    assert_eq!(metrics.latest_summary, "");

    // A rewrite keeps the foreign cells untouched.
    store
        .append(submission(12, 5, "new", "None"))
        .await
        .expect("append");
    let text = fs::read_to_string(&path).await.expect("read back");
    assert!(text.contains("2024-04-11 08:00:00,2.0,\"Cold food, slow\""));
}

#[tokio::test]
async fn test_operator_columns_survive_append_and_resolve() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("reviews_data.csv");
    fs::write(
        &path,
        "timestamp,rating,review,user_response,summary,action,notes\n\
         2024-04-10 08:00:00,2,Slow,Sorry!,slow service,speed up,KEEP-ME\n",
    )
    .await
    .expect("seed file");

    let store = TableReviewStore::new(CsvTableBackend::new(&path));
    store
        .append(submission(12, 5, "new", "None"))
        .await
        .expect("append");
    let rows = store.load_all().await.expect("load");
    store
        .update_action(&rows[0].id_at(0), "speed up (RESOLVED)")
        .await
        .expect("update");

    let text = fs::read_to_string(&path).await.expect("read back");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,rating,review,user_response,summary,action,notes")
    );
    assert_eq!(
        lines.next(),
        Some("2024-04-10 08:00:00,2,Slow,Sorry!,slow service,speed up (RESOLVED),KEEP-ME")
    );
    let appended = lines.next().expect("appended row");
    assert!(appended.starts_with("2024-04-12 12:00:00,5,new,"));
    assert!(appended.ends_with(",None,"));
}

#[tokio::test]
async fn test_malformed_table_fails_loudly() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("reviews_data.csv");
    fs::write(&path, "name,score\nalice,5\n").await.expect("seed file");

    let store = TableReviewStore::new(CsvTableBackend::new(&path));
    assert!(matches!(
        store.load_all().await,
        Err(StorageError::Malformed(_))
    ));
    assert!(matches!(
        store.append(submission(9, 4, "fine", "None")).await,
        Err(StorageError::Malformed(_))
    ));

    // The file is left as it was.
    let text = fs::read_to_string(&path).await.expect("read back");
    assert_eq!(text, "name,score\nalice,5\n");
}

#[tokio::test]
async fn test_export_writes_same_columns() {
    let dir = TempDir::new().expect("tempdir");
    let rows = vec![submission(9, 1, "rude", "Train staff")];
    let out = dir.path().join("customer_feedback.csv");

    let written = export_csv_to_file(&rows, &out).await.expect("export");
    assert_eq!(written, 1);

    let text = fs::read_to_string(&out).await.expect("read export");
    assert!(text.starts_with("timestamp,rating,review,user_response,summary,action\n"));
    assert!(text.contains("2024-04-12 09:00:00,1,rude,Thank you,rude summary,Train staff"));
}
