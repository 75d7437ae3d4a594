use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};

#[derive(Parser, Debug)]
#[command(name = "stream-config")]
#[command(author)]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Local path or s3://bucket/key location of the job property file.
    source: String,
    /// Fail instead of using the documented fallback when the source cannot
    /// be read.
    #[arg(short, long)]
    fail_on_error: bool,
    /// Print the raw file contents instead of resolved parameters.
    #[arg(short, long)]
    text: bool,
    #[clap(value_enum, default_value_t=LogOutput::StdOut)]
    #[arg(short, long)]
    log_output: LogOutput,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogOutput {
    StdOut,
    StdErr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    let mut builder = Builder::from_default_env();
    match args.log_output {
        LogOutput::StdOut => {
            builder.target(Target::Stdout);
        }
        LogOutput::StdErr => {
            builder.target(Target::Stderr);
        }
    }
    builder.init();

    if args.source.starts_with("s3://") {
        let store = config_loader::S3Store::from_env().await;
        if args.text {
            let text = config_loader::load_text_from_object_store(
                &store,
                &args.source,
                args.fail_on_error,
            )
            .await?;
            println!("{text}");
        } else {
            let parameters = config_loader::load_parameters_from_object_store(
                &store,
                &args.source,
                args.fail_on_error,
            )
            .await?;
            print_parameters(&parameters);
        }
    } else if args.text {
        let text = config_loader::load_text_from_file(&args.source, args.fail_on_error)?;
        println!("{text}");
    } else {
        let parameters =
            config_loader::load_parameters_from_file(&args.source, args.fail_on_error)?;
        print_parameters(&parameters);
    }

    Ok(())
}

fn print_parameters(parameters: &job_params::Parameters) {
    for (key, value) in parameters.iter() {
        println!("{key}={value}");
    }

    let offsets = starting_offsets::OffsetsInitializer::from_parameters(parameters);
    log::info!("selected starting offsets: {offsets:?}");
}
