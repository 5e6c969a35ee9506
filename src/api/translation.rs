use serde::{Deserialize, Serialize};

use super::client::KakaoClient;
use super::query::require_text;
use super::request::{Lookup, Payload, Request};
use super::types::Language;
use crate::error::{KakaoError, Result};

/// Longest text accepted by one translation request
pub const MAX_TRANSLATE_CHARS: usize = 5000;

#[derive(Debug, Clone)]
pub struct Translate {
    pub text: String,
    pub src_lang: Language,
    pub target_lang: Language,
}

impl Lookup for Translate {
    type Output = Translation;

    const NAME: &'static str = "Translate";
    const PATH: &'static str = "/v2/translation/translate";

    fn payload(&self) -> Payload {
        Payload::Form(vec![
            ("query", self.text.clone()),
            ("src_lang", self.src_lang.as_str().to_string()),
            ("target_lang", self.target_lang.as_str().to_string()),
        ])
    }

    fn check(&self) -> Result<()> {
        require_text("text", &self.text)
    }
}

#[derive(Debug, Clone)]
pub struct DetectLanguage {
    pub text: String,
}

impl Lookup for DetectLanguage {
    type Output = DetectedLanguages;

    const NAME: &'static str = "DetectLanguage";
    const PATH: &'static str = "/v3/translation/language/detect";

    fn payload(&self) -> Payload {
        Payload::Form(vec![("query", self.text.clone())])
    }

    fn check(&self) -> Result<()> {
        require_text("text", &self.text)
    }
}

impl Request<Translate> {
    pub fn src_lang(mut self, code: &str) -> Self {
        match code.parse::<Language>() {
            Ok(lang) => {
                self.lookup_mut().src_lang = lang;
                self
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn target_lang(mut self, code: &str) -> Self {
        match code.parse::<Language>() {
            Ok(lang) => {
                self.lookup_mut().target_lang = lang;
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

impl KakaoClient {
    /// Translate `text`, Korean to English unless the languages are changed
    pub fn translate(&self, text: &str) -> Request<Translate> {
        let request = Request::new(
            self,
            Translate {
                text: text.to_string(),
                src_lang: Language::Korean,
                target_lang: Language::English,
            },
        );
        let length = text.chars().count();
        if length > MAX_TRANSLATE_CHARS {
            return request.reject(KakaoError::InvalidInput(format!(
                "text is {} characters long, the limit is {}",
                length, MAX_TRANSLATE_CHARS
            )));
        }
        request
    }

    pub fn detect_language(&self, text: &str) -> Request<DetectLanguage> {
        Request::new(self, DetectLanguage { text: text.to_string() })
    }
}

/// Translated text as paragraphs of sentences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub translated_text: Vec<Vec<String>>,
}

impl Translation {
    /// Sentences joined by spaces, paragraphs by newlines
    pub fn text(&self) -> String {
        self.translated_text
            .iter()
            .map(|paragraph| paragraph.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguages {
    #[serde(default)]
    pub language_info: Vec<LanguageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    fn client() -> KakaoClient {
        KakaoClient::new(ClientConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_translation_text_joins_paragraphs() {
        let translation: Translation = serde_json::from_str(
            r#"{"translated_text":[["I like cats.","They are cute."],["The end."]]}"#,
        )
        .unwrap();
        assert_eq!(translation.text(), "I like cats. They are cute.\nThe end.");
    }

    #[test]
    fn test_language_setters() {
        let request = client().translate("안녕하세요").src_lang("kr").target_lang("xx");
        assert_eq!(request.lookup().target_lang, Language::English);
        assert!(matches!(request.last_error(), Some(KakaoError::UnsupportedLanguage(code)) if code == "xx"));
    }

    #[test]
    fn test_long_text_rejected() {
        let text = "가".repeat(MAX_TRANSLATE_CHARS + 1);
        let request = client().translate(&text);
        assert!(matches!(request.last_error(), Some(KakaoError::InvalidInput(_))));
    }

    #[test]
    fn test_detect_response() {
        let detected: DetectedLanguages = serde_json::from_str(
            r#"{"language_info":[{"code":"kr","name":"Korean","confidence":0.99}]}"#,
        )
        .unwrap();
        assert_eq!(detected.language_info[0].code, "kr");
    }
}
