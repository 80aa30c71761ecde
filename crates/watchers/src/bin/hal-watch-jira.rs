use hal9000_watchers::bootstrap::{run, WatcherSpec};

#[tokio::main]
async fn main() {
    run(WatcherSpec {
        source_name: "jira",
        category: "issue",
        required_credentials: &["base_url", "api_token", "jql"],
        default_poll_secs: 10 * 60,
        // A missing JQL hit may be out-of-query-scope, not deleted.
        delete_on_missing: false,
    })
    .await;
}
