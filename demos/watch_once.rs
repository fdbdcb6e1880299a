use sse_watch::config::Config;
use sse_watch::launcher;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/events".to_string());
    let config = Config::new(url).with_timeout(Duration::from_secs(10));
    let outcome = launcher::run(&config, tokio::io::stdout()).await.unwrap();
    println!("{:?}", outcome);
}
