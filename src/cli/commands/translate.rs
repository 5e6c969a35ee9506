use super::{client, print_lookup};
use crate::cli::args::TranslateArgs;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

/// Execute translate command
pub async fn execute(args: TranslateArgs, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = client(api_key)?;
    let translation = client
        .translate(&args.text)
        .src_lang(&args.from)
        .target_lang(&args.to)
        .send()
        .await?;

    match format {
        OutputFormat::Table => println!("{}", translation.text()),
        _ => println!("{}", Formatter::new(format).format_value(&translation)?),
    }
    Ok(())
}

/// Execute detect command
pub async fn detect(text: &str, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = client(api_key)?;
    let detected = client.detect_language(text).send().await?;
    print_lookup(format, &detected, &detected.language_info)
}
