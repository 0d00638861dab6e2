//! # Text Generation
//!
//! Faker-backed text for `sequential_text` columns and append-pass
//! `generate` columns. Method names from a rules file resolve to a fixed
//! [`TextMethod`] set; an unknown name never fails a run, it resolves to
//! [`TextMethod::Name`] with a warning.

use chrono::{Duration as ChronoDuration, NaiveDate};
use fake::faker::address::en::*;
use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::lorem::en::*;
use fake::faker::name::en::*;
use fake::faker::phone_number::en::*;
use fake::Fake;
use rand::Rng;
use tracing::warn;

use crate::generate::value::Value;

/// A supported text generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMethod {
    Name,
    FirstName,
    LastName,
    Username,
    Email,
    PhoneNumber,
    StreetAddress,
    City,
    State,
    Country,
    CountryCode,
    ZipCode,
    Company,
    Job,
    Industry,
    Ipv4,
    Word,
    Sentence,
    Paragraph,
    Date,
    Uuid,
}

impl TextMethod {
    /// Every supported method, in documentation order.
    pub const ALL: &'static [TextMethod] = &[
        TextMethod::Name,
        TextMethod::FirstName,
        TextMethod::LastName,
        TextMethod::Username,
        TextMethod::Email,
        TextMethod::PhoneNumber,
        TextMethod::StreetAddress,
        TextMethod::City,
        TextMethod::State,
        TextMethod::Country,
        TextMethod::CountryCode,
        TextMethod::ZipCode,
        TextMethod::Company,
        TextMethod::Job,
        TextMethod::Industry,
        TextMethod::Ipv4,
        TextMethod::Word,
        TextMethod::Sentence,
        TextMethod::Paragraph,
        TextMethod::Date,
        TextMethod::Uuid,
    ];

    /// Look a method up by name (Faker-style aliases accepted).
    pub fn lookup(name: &str) -> Option<Self> {
        let method = match name.trim().to_ascii_lowercase().as_str() {
            "name" | "full_name" => TextMethod::Name,
            "first_name" => TextMethod::FirstName,
            "last_name" => TextMethod::LastName,
            "user_name" | "username" => TextMethod::Username,
            "email" | "safe_email" => TextMethod::Email,
            "phone_number" | "phone" => TextMethod::PhoneNumber,
            "address" | "street_address" | "street_name" => TextMethod::StreetAddress,
            "city" => TextMethod::City,
            "state" => TextMethod::State,
            "country" => TextMethod::Country,
            "country_code" => TextMethod::CountryCode,
            "zipcode" | "zip_code" | "postcode" => TextMethod::ZipCode,
            "company" | "company_name" => TextMethod::Company,
            "job" | "profession" => TextMethod::Job,
            "industry" => TextMethod::Industry,
            "ipv4" => TextMethod::Ipv4,
            "word" => TextMethod::Word,
            "sentence" => TextMethod::Sentence,
            "paragraph" | "text" => TextMethod::Paragraph,
            "date" => TextMethod::Date,
            "uuid" | "uuid4" => TextMethod::Uuid,
            _ => return None,
        };
        Some(method)
    }

    /// Resolve a method name, falling back to [`TextMethod::Name`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            warn!(
                "Unknown text method '{}', falling back to 'name'. Supported: {}",
                name,
                Self::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            TextMethod::Name
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextMethod::Name => "name",
            TextMethod::FirstName => "first_name",
            TextMethod::LastName => "last_name",
            TextMethod::Username => "user_name",
            TextMethod::Email => "email",
            TextMethod::PhoneNumber => "phone_number",
            TextMethod::StreetAddress => "address",
            TextMethod::City => "city",
            TextMethod::State => "state",
            TextMethod::Country => "country",
            TextMethod::CountryCode => "country_code",
            TextMethod::ZipCode => "zipcode",
            TextMethod::Company => "company",
            TextMethod::Job => "job",
            TextMethod::Industry => "industry",
            TextMethod::Ipv4 => "ipv4",
            TextMethod::Word => "word",
            TextMethod::Sentence => "sentence",
            TextMethod::Paragraph => "paragraph",
            TextMethod::Date => "date",
            TextMethod::Uuid => "uuid",
        }
    }
}

/// Window for `date` values, inclusive start, exclusive end.
const DATE_WINDOW: ((i32, u32, u32), (i32, u32, u32)) = ((2020, 1, 1), (2024, 12, 31));

/// Generate one text value.
pub fn generate_text(method: TextMethod, rng: &mut impl Rng) -> Value {
    let text: String = match method {
        TextMethod::Name => Name().fake_with_rng(rng),
        TextMethod::FirstName => FirstName().fake_with_rng(rng),
        TextMethod::LastName => LastName().fake_with_rng(rng),
        TextMethod::Username => Username().fake_with_rng(rng),
        TextMethod::Email => SafeEmail().fake_with_rng(rng),
        TextMethod::PhoneNumber => PhoneNumber().fake_with_rng(rng),
        TextMethod::StreetAddress => {
            let number: String = BuildingNumber().fake_with_rng(rng);
            let street: String = StreetName().fake_with_rng(rng);
            format!("{} {}", number, street)
        }
        TextMethod::City => CityName().fake_with_rng(rng),
        TextMethod::State => StateName().fake_with_rng(rng),
        TextMethod::Country => CountryName().fake_with_rng(rng),
        TextMethod::CountryCode => CountryCode().fake_with_rng(rng),
        TextMethod::ZipCode => ZipCode().fake_with_rng(rng),
        TextMethod::Company => CompanyName().fake_with_rng(rng),
        TextMethod::Job => Profession().fake_with_rng(rng),
        TextMethod::Industry => Industry().fake_with_rng(rng),
        TextMethod::Ipv4 => IPv4().fake_with_rng(rng),
        TextMethod::Word => Word().fake_with_rng(rng),
        TextMethod::Sentence => Sentence(5..12).fake_with_rng(rng),
        TextMethod::Paragraph => Paragraph(3..6).fake_with_rng(rng),
        TextMethod::Date => random_date(rng),
        TextMethod::Uuid => uuid::Builder::from_random_bytes(rng.random())
            .into_uuid()
            .to_string(),
    };
    Value::String(text)
}

fn random_date(rng: &mut impl Rng) -> String {
    let ((sy, sm, sd), (ey, em, ed)) = DATE_WINDOW;
    let start = NaiveDate::from_ymd_opt(sy, sm, sd).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(ey, em, ed).unwrap_or_default();
    let span = (end - start).num_days().max(1);
    let date = start + ChronoDuration::days(rng.random_range(0..span));
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(TextMethod::lookup("first_name"), Some(TextMethod::FirstName));
        assert_eq!(TextMethod::lookup("Safe_Email"), Some(TextMethod::Email));
        assert_eq!(TextMethod::lookup("postcode"), Some(TextMethod::ZipCode));
        assert_eq!(TextMethod::lookup("no_such_method"), None);
    }

    #[test]
    fn test_unknown_name_falls_back_to_name() {
        assert_eq!(TextMethod::from_name("bogus"), TextMethod::Name);
    }

    #[test]
    fn test_every_method_round_trips_its_name() {
        for method in TextMethod::ALL {
            assert_eq!(TextMethod::lookup(method.as_str()), Some(*method));
        }
    }

    #[test]
    fn test_every_method_produces_text() {
        let mut rng = StdRng::seed_from_u64(42);
        for method in TextMethod::ALL {
            match generate_text(*method, &mut rng) {
                Value::String(s) => assert!(!s.is_empty(), "{:?} produced empty text", method),
                other => panic!("{:?} produced {:?}", method, other),
            }
        }
    }

    #[test]
    fn test_email_and_date_shapes() {
        let mut rng = StdRng::seed_from_u64(3);
        let email = generate_text(TextMethod::Email, &mut rng);
        assert!(email.to_text().contains('@'));

        let date = generate_text(TextMethod::Date, &mut rng).to_text();
        let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d").unwrap();
        assert!(parsed >= NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(parsed < NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(
            generate_text(TextMethod::Name, &mut a),
            generate_text(TextMethod::Name, &mut b)
        );
    }
}
