use std::fmt;

use super::{Offer, Product};

/// A detail card: ordered label/value lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub lines: Vec<(String, String)>,
}

impl Card {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Null members render as an empty value
fn text<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl From<&Product> for Card {
    fn from(product: &Product) -> Self {
        Card {
            lines: vec![
                ("ID".to_string(), text(&product.id)),
                ("Name".to_string(), text(&product.name)),
                ("Inventory".to_string(), text(&product.inventory)),
                ("Type".to_string(), text(&product.product_type)),
            ],
        }
    }
}

impl From<&Offer> for Card {
    fn from(offer: &Offer) -> Self {
        Card {
            lines: vec![
                ("Offer Code".to_string(), text(&offer.offer_code)),
                ("Valid Until".to_string(), offer.valid_until_display()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Cards(Vec<Card>),
    /// Nothing to show; carries the "no results" message
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

impl Section {
    /// Cards for the non-null entries, or `empty_message` when there are none
    pub fn list<'a, T>(
        heading: impl Into<String>,
        entries: &'a [Option<T>],
        empty_message: impl Into<String>,
    ) -> Self
    where
        &'a T: Into<Card>,
    {
        let cards: Vec<Card> = entries.iter().flatten().map(Into::into).collect();
        let body = if cards.is_empty() {
            SectionBody::Empty(empty_message.into())
        } else {
            SectionBody::Cards(cards)
        };
        Section {
            heading: heading.into(),
            body,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match &self.body {
            SectionBody::Cards(cards) => cards,
            SectionBody::Empty(_) => &[],
        }
    }
}

/// Everything a front end needs to draw a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub sections: Vec<Section>,
}

impl FormView {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.sections.iter().flat_map(Section::cards)
    }

    /// Whether any rendered text equals `text`, the way a reader would
    /// find it on screen
    pub fn shows(&self, text: &str) -> bool {
        self.title == text
            || self.submit_label == text
            || self.sections.iter().any(|section| {
                section.heading == text
                    || match &section.body {
                        SectionBody::Empty(message) => message == text,
                        SectionBody::Cards(cards) => cards
                            .iter()
                            .flat_map(|card| card.lines.iter())
                            .any(|(label, value)| label == text || value == text),
                    }
            })
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.submit_enabled {
            writeln!(f, "[{}]", self.submit_label)?;
        } else {
            writeln!(f, "[{}] (disabled)", self.submit_label)?;
        }
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading)?;
            match &section.body {
                SectionBody::Empty(message) => writeln!(f, "  {message}")?,
                SectionBody::Cards(cards) => {
                    for card in cards {
                        for (label, value) in &card.lines {
                            writeln!(f, "  {label}: {value}")?;
                        }
                        writeln!(f)?;
                    }
                }
            }
        }
        Ok(())
    }
}
