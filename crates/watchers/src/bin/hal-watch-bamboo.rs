use hal9000_watchers::bootstrap::{run, WatcherSpec};

#[tokio::main]
async fn main() {
    run(WatcherSpec {
        source_name: "bamboo",
        category: "people",
        required_credentials: &["subdomain", "api_key"],
        default_poll_secs: 30 * 60,
        delete_on_missing: true,
    })
    .await;
}
