mod commands;

use cmdkit::App;

use crate::commands::Greeter;

#[tokio::main]
async fn main() {
    env_logger::init();

    let app = match App::new::<Greeter>("greeter") {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1)
        }
    };
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let code = app.run_async(&args).await;
    std::process::exit(code)
}
