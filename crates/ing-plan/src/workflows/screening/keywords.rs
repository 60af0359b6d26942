use super::domain::{Discipline, Offer};

/// Keyword table checked top to bottom; the first substring hit decides the discipline.
pub const DISCIPLINE_KEYWORDS: [(&str, Discipline); 20] = [
    ("straße", Discipline::Road),
    ("strasse", Discipline::Road),
    ("verkehr", Discipline::Road),
    ("radweg", Discipline::Road),
    ("parkplatz", Discipline::Road),
    ("freianlagen", Discipline::Road),
    ("wasser", Discipline::Water),
    ("entwässerung", Discipline::Water),
    ("entwaesserung", Discipline::Water),
    ("kanal", Discipline::Water),
    ("regen", Discipline::Water),
    ("altlast", Discipline::Remediation),
    ("umwelt", Discipline::Remediation),
    ("entflechtung", Discipline::Remediation),
    ("rückbau", Discipline::Remediation),
    ("rueckbau", Discipline::Remediation),
    ("vermessung", Discipline::Surveying),
    ("geodäsie", Discipline::Surveying),
    ("geodaesie", Discipline::Surveying),
    ("kataster", Discipline::Surveying),
];

pub fn infer_discipline(offer: &Offer) -> Option<Discipline> {
    let text = format!(
        "{} {}",
        offer.title,
        offer.notes.as_deref().unwrap_or_default()
    );
    infer_discipline_from_text(&text)
}

pub fn infer_discipline_from_text(text: &str) -> Option<Discipline> {
    let text = text.to_lowercase();
    DISCIPLINE_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(*keyword))
        .map(|(_, discipline)| *discipline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_covers_every_discipline() {
        for discipline in Discipline::ordered() {
            assert!(DISCIPLINE_KEYWORDS
                .iter()
                .any(|(_, candidate)| *candidate == discipline));
        }
        assert!(DISCIPLINE_KEYWORDS
            .iter()
            .all(|(keyword, _)| *keyword == keyword.to_lowercase()));
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        assert_eq!(
            infer_discipline_from_text("Ausbau EITELSTRASSE Nord"),
            Some(Discipline::Road)
        );
        assert_eq!(
            infer_discipline_from_text("Kanalinspektion Rhede"),
            Some(Discipline::Water)
        );
        assert_eq!(
            infer_discipline_from_text("Altlastensanierung Zeche"),
            Some(Discipline::Remediation)
        );
        assert_eq!(
            infer_discipline_from_text("Liegenschaftskataster"),
            Some(Discipline::Surveying)
        );
        assert_eq!(infer_discipline_from_text("Rathausplatz LP1-LP6"), None);
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        // "entwässerung" appears first in the text but road keywords are checked first.
        assert_eq!(
            infer_discipline_from_text("Entwässerung und Verkehrsanlagen"),
            Some(Discipline::Road)
        );
        assert_eq!(
            infer_discipline_from_text("Umweltgutachten Regenrückhaltebecken"),
            Some(Discipline::Water)
        );
    }
}
