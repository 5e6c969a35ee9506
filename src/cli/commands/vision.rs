use colored::*;

use super::{client, print_lookup};
use crate::api::request::ImageSource;
use crate::cli::args::{VisionArgs, VisionCommand};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

/// Execute vision command
pub async fn execute(args: VisionArgs, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = client(api_key)?;
    let formatter = Formatter::new(format);
    let table = matches!(format, OutputFormat::Table);

    match args.command {
        VisionCommand::Ocr { file } => {
            let result = client.ocr(file).send().await?;
            print_lookup(format, &result, &result.result)
        }
        VisionCommand::Face { image, threshold } => {
            let mut request = client.detect_faces(ImageSource::parse(&image));
            if let Some(threshold) = threshold {
                request = request.threshold(threshold);
            }
            let result = request.send().await?;
            print_lookup(format, &result, &result.result.faces)
        }
        VisionCommand::Product { image, threshold } => {
            let mut request = client.detect_products(ImageSource::parse(&image));
            if let Some(threshold) = threshold {
                request = request.threshold(threshold);
            }
            let result = request.send().await?;
            print_lookup(format, &result, &result.result.objects)
        }
        VisionCommand::Tag { image } => {
            let result = client.multitag(ImageSource::parse(&image)).send().await?;
            if table {
                println!("{} {}", "Labels:".cyan(), result.result.label.join(", "));
                println!("{} {}", "라벨:".cyan(), result.result.label_kr.join(", "));
            } else {
                println!("{}", formatter.format_value(&result)?);
            }
            Ok(())
        }
        VisionCommand::Adult { image } => {
            let result = client.detect_adult(ImageSource::parse(&image)).send().await?;
            if table {
                let scores = &result.result;
                println!(
                    "normal {:.3} | soft {:.3} | adult {:.3}",
                    scores.normal, scores.soft, scores.adult
                );
            } else {
                println!("{}", formatter.format_value(&result)?);
            }
            Ok(())
        }
        VisionCommand::Thumbnail {
            image,
            width,
            height,
            crop,
        } => {
            let source = ImageSource::parse(&image);
            if crop {
                let result = client.crop_thumbnail(source, width, height).send().await?;
                if table {
                    println!("{}", result.thumbnail_image_url);
                } else {
                    println!("{}", formatter.format_value(&result)?);
                }
            } else {
                let result = client.detect_thumbnail(source, width, height).send().await?;
                if table {
                    let area = &result.result.thumbnail;
                    println!(
                        "x {} | y {} | width {} | height {}",
                        area.x, area.y, area.width, area.height
                    );
                } else {
                    println!("{}", formatter.format_value(&result)?);
                }
            }
            Ok(())
        }
    }
}

/// Execute pose command
pub async fn pose(image: &str, api_key: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = client(api_key)?;
    let poses = client.estimate_pose(ImageSource::parse(image)).send().await?;
    print_lookup(format, &poses, &poses)
}
