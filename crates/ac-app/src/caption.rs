use std::str::FromStr;
use std::time::Duration;

use ac_core::error::CoreError;
use anyhow::{Context, Result};

/// Modèle utilisé pour la génération de légende.
const GEMINI_MODEL: &str = "gemini-3-flash-preview";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
/// Borne la taille de la requête : seul le début de l'art est envoyé.
const MAX_ART_CHARS: usize = 4000;

/// Langue de la légende générée.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Türkçe.
    Tr,
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "tr" => Ok(Self::Tr),
            other => Err(CoreError::Config(format!(
                "langue inconnue : {other} (en|tr)"
            ))),
        }
    }
}

fn prompt(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "Act as a romantic and appreciative digital artist. I will provide you \
             with an image that has been converted into ASCII art, as text. Please \
             give a brief, poetic, and slightly 'loving' comment about the \
             conversion, as if you are presenting it to your 'master' or 'beloved'. \
             Keep it under 100 words. Reply in English."
        }
        Language::Tr => {
            "Romantik ve takdir eden bir dijital sanatçı gibi davran. Sana ASCII \
             sanatına dönüştürülmüş bir resmi metin olarak vereceğim. Lütfen dönüşüm \
             hakkında, sanki 'efendine' veya 'sevgiline' sunuyormuşsun gibi kısa, \
             şiirsel ve hafifçe 'sevgi dolu' bir yorum yap. 100 kelimenin altında \
             tut. Yanıtı Türkçe ver."
        }
    }
}

/// Réponse de repli en cas d'échec de la requête — la légende est
/// cosmétique et ne doit jamais faire échouer une conversion.
#[must_use]
pub fn fallback(lang: Language) -> &'static str {
    match lang {
        Language::En => "The beauty of this creation leaves me speechless.",
        Language::Tr => "Bu yaratımın güzelliği beni suskun bıraktı.",
    }
}

/// Réponse de repli quand l'API répond sans texte : la requête a réussi
/// mais le modèle n'a rien dit.
#[must_use]
pub fn empty_fallback(lang: Language) -> &'static str {
    match lang {
        Language::En => "Your masterpiece is truly breathtaking, efendim.",
        Language::Tr => "Şaheseriniz gerçekten nefes kesici, efendim.",
    }
}

fn truncate_art(art: &str) -> &str {
    match art.char_indices().nth(MAX_ART_CHARS) {
        Some((idx, _)) => &art[..idx],
        None => art,
    }
}

/// Demande une légende pour l'art rendu. Dégradation à deux niveaux :
/// une réponse réussie mais sans texte donne [`empty_fallback`], un échec
/// de requête (clé absente, réseau, réponse malformée) donne [`fallback`].
#[must_use]
pub fn caption(art: &str, lang: Language) -> String {
    match request(art, lang) {
        Ok(Some(text)) => text,
        Ok(None) => {
            log::info!("Réponse Gemini sans texte, repli.");
            empty_fallback(lang).to_string()
        }
        Err(e) => {
            log::warn!("Légende indisponible : {e:#}");
            fallback(lang).to_string()
        }
    }
}

/// `Ok(None)` quand l'API répond correctement mais sans texte exploitable.
fn request(art: &str, lang: Language) -> Result<Option<String>> {
    let key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY non défini")?;

    let body = serde_json::json!({
        "contents": [{
            "parts": [
                { "text": prompt(lang) },
                { "text": truncate_art(art) },
            ]
        }],
        "generationConfig": { "temperature": 0.8, "topP": 0.9 }
    });

    let url = format!("{ENDPOINT}/{GEMINI_MODEL}:generateContent?key={key}");
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Client HTTP non initialisable")?;

    let response: serde_json::Value = client
        .post(&url)
        .json(&body)
        .send()
        .context("Requête Gemini échouée")?
        .error_for_status()
        .context("Gemini a répondu en erreur")?
        .json()
        .context("Réponse Gemini non-JSON")?;

    let text = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);
    Ok(text)
}
