use hal9000_watchers::bootstrap::{run, WatcherSpec};

#[tokio::main]
async fn main() {
    run(WatcherSpec {
        source_name: "calendar",
        category: "calendar",
        required_credentials: &["calendar_id", "access_token"],
        default_poll_secs: 5 * 60,
        delete_on_missing: true,
    })
    .await;
}
