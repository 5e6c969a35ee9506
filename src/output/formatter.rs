use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::api::geo::{CoordAddress, Point, Region};
use crate::api::local::{AddressDocument, Place};
use crate::api::pose::Pose;
use crate::api::search::{
    BlogDocument, BookDocument, CafeDocument, ImageDocument, VideoDocument, WebDocument,
};
use crate::api::translation::LanguageInfo;
use crate::api::types::PageResult;
use crate::api::vision::{DetectedObject, Face, OcrLine};
use crate::cli::OutputFormat;
use crate::error::{KakaoError, Result};

/// A record that can be shown as one table or CSV row
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format one or more fetched pages
    pub fn format_pages<D: Tabular + Serialize>(&self, pages: &[PageResult<D>]) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                let mut result = String::new();
                if let Some(last) = pages.last() {
                    let fetched: usize = pages.iter().map(|p| p.documents.len()).sum();
                    result.push_str(&format!(
                        "\n{} Total: {} | Pageable: {} | Results: {}{}\n\n",
                        "📊".cyan(),
                        last.meta.total_count.to_string().yellow(),
                        last.meta.pageable_count.to_string().yellow(),
                        fetched.to_string().yellow(),
                        if last.meta.is_end { " | end" } else { "" }
                    ));
                }
                let rows: Vec<&D> = pages.iter().flat_map(|p| p.documents.iter()).collect();
                result.push_str(&render_table(&rows));
                Ok(result)
            }
            OutputFormat::Csv => {
                let rows: Vec<&D> = pages.iter().flat_map(|p| p.documents.iter()).collect();
                render_csv(&rows)
            }
            OutputFormat::Json => match pages {
                [single] => self.format_value(single),
                _ => self.format_value(&pages),
            },
            OutputFormat::Xml => match pages {
                [single] => to_xml("result", single),
                _ => to_xml("pages", &Pages { pages }),
            },
        }
    }

    /// Format a list of records
    pub fn format_rows<D: Tabular + Serialize>(&self, rows: &[D]) -> Result<String> {
        let refs: Vec<&D> = rows.iter().collect();
        match self.format {
            OutputFormat::Table => Ok(render_table(&refs)),
            OutputFormat::Csv => render_csv(&refs),
            OutputFormat::Json => self.format_value(&rows),
            OutputFormat::Xml => to_xml("result", &Rows { documents: rows }),
        }
    }

    /// Format any serializable value; table and CSV fall back to JSON
    pub fn format_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        match self.format {
            OutputFormat::Xml => to_xml("result", value),
            _ => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

fn render_table<D: Tabular>(rows: &[&D]) -> String {
    let mut table = Table::new();

    table.set_header(
        D::headers()
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );

    for row in rows {
        table.add_row(
            row.row()
                .iter()
                .map(|value| Cell::new(truncate_string(value, 40)))
                .collect::<Vec<_>>(),
        );
    }

    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.to_string()
}

fn render_csv<D: Tabular>(rows: &[&D]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(D::headers())?;
    for row in rows {
        wtr.write_record(row.row())?;
    }

    let data = wtr.into_inner().map_err(|e| KakaoError::Io(e.into_error()))?;

    // Add BOM for Excel compatibility
    let mut result = vec![0xEF, 0xBB, 0xBF];
    result.extend_from_slice(&data);

    String::from_utf8(result).map_err(|e| KakaoError::Parse(e.to_string()))
}

/// Several pages as one XML document, each page a `<result>` element
#[derive(Serialize)]
pub(crate) struct Pages<'a, D> {
    #[serde(rename = "result")]
    pub pages: &'a [PageResult<D>],
}

#[derive(Serialize)]
struct Rows<'a, D> {
    #[serde(rename = "documents")]
    documents: &'a [D],
}

pub(crate) fn to_xml<T: Serialize + ?Sized>(root: &str, value: &T) -> Result<String> {
    let body = quick_xml::se::to_string_with_root(root, value)
        .map_err(|e| KakaoError::Xml(e.to_string()))?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", body))
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Drop the `<b>` highlight tags search results wrap around matches
fn strip_highlight(s: &str) -> String {
    s.replace("<b>", "").replace("</b>", "")
}

fn datetime(value: &Option<chrono::DateTime<chrono::FixedOffset>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Tabular for WebDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "URL", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![strip_highlight(&self.title), self.url.clone(), datetime(&self.datetime)]
    }
}

impl Tabular for VideoDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Author", "Length", "URL", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            strip_highlight(&self.title),
            self.author.clone(),
            format!("{}:{:02}", self.play_time / 60, self.play_time % 60),
            self.url.clone(),
            datetime(&self.datetime),
        ]
    }
}

impl Tabular for ImageDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Site", "Size", "Image URL", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.display_sitename.clone(),
            format!("{}x{}", self.width, self.height),
            self.image_url.clone(),
            datetime(&self.datetime),
        ]
    }
}

impl Tabular for BlogDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Blog", "URL", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            strip_highlight(&self.title),
            self.blogname.clone(),
            self.url.clone(),
            datetime(&self.datetime),
        ]
    }
}

impl Tabular for CafeDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Cafe", "URL", "Date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            strip_highlight(&self.title),
            self.cafename.clone(),
            self.url.clone(),
            datetime(&self.datetime),
        ]
    }
}

impl Tabular for BookDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Authors", "Publisher", "Price", "ISBN", "Published"]
    }

    fn row(&self) -> Vec<String> {
        let price = if self.sale_price >= 0 { self.sale_price } else { self.price };
        vec![
            self.title.clone(),
            self.authors.join(", "),
            self.publisher.clone(),
            price.to_string(),
            self.isbn.clone(),
            datetime(&self.datetime),
        ]
    }
}

impl Tabular for AddressDocument {
    fn headers() -> Vec<&'static str> {
        vec!["Address", "Type", "Road address", "Zone", "X", "Y"]
    }

    fn row(&self) -> Vec<String> {
        let road = self.road_address.as_ref();
        vec![
            self.address_name.clone(),
            self.address_type.clone(),
            road.map(|r| r.address_name.clone()).unwrap_or_else(|| "-".to_string()),
            road.map(|r| r.zone_no.clone()).unwrap_or_else(|| "-".to_string()),
            self.x.clone(),
            self.y.clone(),
        ]
    }
}

impl Tabular for Place {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Category", "Phone", "Address", "Distance", "URL"]
    }

    fn row(&self) -> Vec<String> {
        let address = if self.road_address_name.is_empty() {
            &self.address_name
        } else {
            &self.road_address_name
        };
        vec![
            self.place_name.clone(),
            self.category_group_name.clone(),
            self.phone.clone(),
            address.clone(),
            if self.distance.is_empty() {
                "-".to_string()
            } else {
                format!("{}m", self.distance)
            },
            self.place_url.clone(),
        ]
    }
}

impl Tabular for Region {
    fn headers() -> Vec<&'static str> {
        vec!["Type", "Region", "Code", "X", "Y"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.region_type.clone(),
            self.address_name.clone(),
            self.code.clone(),
            self.x.to_string(),
            self.y.to_string(),
        ]
    }
}

impl Tabular for CoordAddress {
    fn headers() -> Vec<&'static str> {
        vec!["Lot address", "Road address", "Building"]
    }

    fn row(&self) -> Vec<String> {
        let road = self.road_address.as_ref();
        vec![
            self.address
                .as_ref()
                .map(|a| a.address_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            road.map(|r| r.address_name.clone()).unwrap_or_else(|| "-".to_string()),
            road.map(|r| r.building_name.clone()).unwrap_or_default(),
        ]
    }
}

impl Tabular for Point {
    fn headers() -> Vec<&'static str> {
        vec!["X", "Y"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.x.to_string(), self.y.to_string()]
    }
}

impl Tabular for LanguageInfo {
    fn headers() -> Vec<&'static str> {
        vec!["Code", "Language", "Confidence"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.code.clone(), self.name.clone(), format!("{:.3}", self.confidence)]
    }
}

impl Tabular for OcrLine {
    fn headers() -> Vec<&'static str> {
        vec!["Text", "Top left", "Bottom right"]
    }

    fn row(&self) -> Vec<String> {
        let corner = |i: usize| {
            self.boxes
                .get(i)
                .map(|[x, y]| format!("({}, {})", x, y))
                .unwrap_or_else(|| "-".to_string())
        };
        vec![self.recognition_words.join(" "), corner(0), corner(2)]
    }
}

impl Tabular for Face {
    fn headers() -> Vec<&'static str> {
        vec!["X", "Y", "W", "H", "Score", "Age", "Male"]
    }

    fn row(&self) -> Vec<String> {
        let attributes = self.facial_attributes.as_ref();
        vec![
            format!("{:.3}", self.x),
            format!("{:.3}", self.y),
            format!("{:.3}", self.w),
            format!("{:.3}", self.h),
            format!("{:.3}", self.score),
            attributes.map(|a| format!("{:.0}", a.age)).unwrap_or_else(|| "-".to_string()),
            attributes
                .map(|a| format!("{:.3}", a.gender.male))
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl Tabular for DetectedObject {
    fn headers() -> Vec<&'static str> {
        vec!["Class", "X1", "Y1", "X2", "Y2"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.class.clone(),
            format!("{:.3}", self.x1),
            format!("{:.3}", self.y1),
            format!("{:.3}", self.x2),
            format!("{:.3}", self.y2),
        ]
    }
}

impl Tabular for Pose {
    fn headers() -> Vec<&'static str> {
        vec!["Score", "Area", "BBox", "Keypoints"]
    }

    fn row(&self) -> Vec<String> {
        let visible = self.keypoints().iter().filter(|k| k.score > 0.0).count();
        vec![
            format!("{:.3}", self.score),
            format!("{:.0}", self.area),
            self.bbox
                .iter()
                .map(|v| format!("{:.0}", v))
                .collect::<Vec<_>>()
                .join(", "),
            visible.to_string(),
        ]
    }
}
