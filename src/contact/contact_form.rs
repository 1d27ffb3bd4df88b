use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Contact,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Submitted,
}

/// Phone-or-email check for the contact field.
pub struct ContactValidator {
    phone_regex: Regex,
    email_regex: Regex,
}

impl ContactValidator {
    pub fn new() -> Result<Self> {
        Ok(ContactValidator {
            phone_regex: Regex::new(r"^[\+]?[(]?[0-9]{3}[)]?[-\s\.]?[0-9]{3}[-\s\.]?[0-9]{4,6}$")?,
            email_regex: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
        })
    }

    pub fn is_valid_contact(&self, value: &str) -> bool {
        self.phone_regex.is_match(value) || self.email_regex.is_match(value)
    }
}

/// The "Get in touch" form on the contact section.
pub struct ContactForm {
    validator: ContactValidator,
    submit_delay: Duration,
    pub name: String,
    pub contact: String,
    pub message: String,
    errors: BTreeMap<ContactField, &'static str>,
    status: FormStatus,
    last_submitted_at: Option<DateTime<Utc>>,
}

impl ContactForm {
    pub fn new() -> Result<Self> {
        Self::with_submit_delay(Duration::from_millis(1000))
    }

    pub fn with_submit_delay(submit_delay: Duration) -> Result<Self> {
        Ok(ContactForm {
            validator: ContactValidator::new()?,
            submit_delay,
            name: String::new(),
            contact: String::new(),
            message: String::new(),
            errors: BTreeMap::new(),
            status: FormStatus::Editing,
            last_submitted_at: None,
        })
    }

    /// Edits a field and clears its error.
    pub fn update(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Contact => self.contact = value,
            ContactField::Message => self.message = value,
        }
        self.errors.remove(&field);
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear();

        if self.name.trim().is_empty() {
            self.errors.insert(ContactField::Name, "Name is required");
        }

        if self.contact.trim().is_empty() {
            self.errors.insert(ContactField::Contact, "Phone or email is required");
        } else if !self.validator.is_valid_contact(&self.contact) {
            self.errors
                .insert(ContactField::Contact, "Please enter a valid phone number or email");
        }

        if self.message.trim().is_empty() {
            self.errors.insert(ContactField::Message, "Message is required");
        }

        self.errors.is_empty()
    }

    pub fn error(&self, field: ContactField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn last_submitted_at(&self) -> Option<DateTime<Utc>> {
        self.last_submitted_at
    }

    /// Validates, then waits out the simulated request and clears the fields.
    /// Returns `false` without waiting when validation fails.
    pub async fn submit(&mut self) -> bool {
        if !self.validate() {
            return false;
        }

        self.status = FormStatus::Submitting;
        sleep(self.submit_delay).await;

        info!("Contact request received from {}", self.name.trim());
        self.name.clear();
        self.contact.clear();
        self.message.clear();
        self.last_submitted_at = Some(Utc::now());
        self.status = FormStatus::Submitted;
        true
    }

    /// "Send another message".
    pub fn send_another(&mut self) {
        self.status = FormStatus::Editing;
    }
}
