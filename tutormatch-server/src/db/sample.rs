//! Fixed records served when no database is configured.
//!
//! Every call returns an identical, freshly built list. Timestamps are
//! left empty; the records are never written anywhere.

use crate::models::{Client, Tutor};

pub fn sample_tutors() -> Vec<Tutor> {
    vec![
        Tutor {
            id: 1,
            name: "John Smith".to_owned(),
            email: Some("john.smith@email.com".to_owned()),
            subjects: vec!["Mathematics".to_owned(), "Physics".to_owned()],
            pay: 50.0,
            rating: 4.8,
            bio: "Experienced math and physics tutor with 5+ years of experience".to_owned(),
            language: Some("English".to_owned()),
            location: Some("Boston, MA".to_owned()),
            availability: None,
            experience: Some("5+ years".to_owned()),
            education: None,
            certification: None,
            created_at: None,
            updated_at: None,
        },
        Tutor {
            id: 2,
            name: "Sarah Johnson".to_owned(),
            email: Some("sarah.johnson@email.com".to_owned()),
            subjects: vec![
                "English".to_owned(),
                "Literature".to_owned(),
                "Writing".to_owned(),
            ],
            pay: 45.0,
            rating: 4.9,
            bio: "English literature expert specializing in creative writing and essay composition"
                .to_owned(),
            language: Some("English".to_owned()),
            location: None,
            availability: Some("Weekday evenings".to_owned()),
            experience: None,
            education: Some("MA English Literature".to_owned()),
            certification: None,
            created_at: None,
            updated_at: None,
        },
    ]
}

pub fn sample_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Mike Davis".to_owned(),
            email: Some("mike.davis@email.com".to_owned()),
            subjects: vec!["Mathematics".to_owned()],
            budget: 60.0,
            description: "Looking for advanced calculus help".to_owned(),
            language: Some("English".to_owned()),
            location: None,
            availability: None,
            education: Some("Undergraduate".to_owned()),
            created_at: None,
            updated_at: None,
        },
        Client {
            id: 2,
            name: "Emily Wilson".to_owned(),
            email: Some("emily.wilson@email.com".to_owned()),
            subjects: vec!["English".to_owned(), "Writing".to_owned()],
            budget: 50.0,
            description: "Need help with essay writing and literature analysis".to_owned(),
            language: None,
            location: Some("Chicago, IL".to_owned()),
            availability: Some("Weekends".to_owned()),
            education: None,
            created_at: None,
            updated_at: None,
        },
    ]
}
