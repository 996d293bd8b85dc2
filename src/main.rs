use glyph_icons::{run, Config, Error, Parsed};

fn main() {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(Parsed::Render(config)) => config,
        Ok(Parsed::Print(text)) => {
            print!("{text}");
            return;
        }
        Err(e) => {
            eprintln!("❌ {e}");
            println!("{}", Config::help());
            std::process::exit(1);
        }
    };

    let level = if config.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match run(&config) {
        Ok(path) => println!("Icon saved as: {}", path.display()),
        Err(e) => {
            eprintln!("❌ {e}");
            if let Error::FontNotFound { .. } = e {
                eprintln!("Fonts are read from <font-name>.ttf in the current directory.");
            }
            std::process::exit(1);
        }
    }
}
