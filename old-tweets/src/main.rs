use std::process;

#[tokio::main]
async fn main() {
    let code = old_tweets::run(std::env::args_os()).await;
    process::exit(code);
}
