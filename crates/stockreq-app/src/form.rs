// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::Date;

use crate::completer::Completer;
use crate::model::{ReferenceData, SubmissionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Driver,
    Truck,
    Item,
    Quantity,
}

impl FieldId {
    pub const ALL: [Self; 4] = [Self::Driver, Self::Truck, Self::Item, Self::Quantity];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Truck => "truck",
            Self::Item => "item",
            Self::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("quantity must be an integer value")]
    QuantityNotInteger,
    #[error("a request must have a driver, a truck, and an item")]
    MissingSelections,
}

/// Parses the raw quantity field text. The trailing structural newline some
/// text widgets append is stripped before parsing; a float that equals its
/// truncation is accepted as that integer (`3.0` is 3, `3.5` is rejected).
pub fn parse_quantity(raw: &str) -> Result<i64, SubmitError> {
    let trimmed = raw.trim_end_matches(['\r', '\n']).trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| SubmitError::QuantityNotInteger)?;
    if !value.is_finite() || value != value.trunc() {
        return Err(SubmitError::QuantityNotInteger);
    }
    Ok(value as i64)
}

/// The mutable form state, owned by the controller and passed explicitly --
/// no process-wide globals. Driver, truck, and item are autocompleting
/// selectors; quantity is raw field text; the description is derived from
/// the item selection and read-only to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    pub driver: Completer,
    pub truck: Completer,
    pub item: Completer,
    pub quantity: String,
    pub description: String,
    pub focus: FieldId,
}

impl RequestForm {
    pub fn new(reference: &ReferenceData) -> Self {
        Self {
            driver: Completer::with_candidates(reference.drivers.iter().cloned()),
            truck: Completer::with_candidates(reference.trucks.iter().cloned()),
            item: Completer::with_candidates(reference.item_names()),
            quantity: String::new(),
            description: String::new(),
            focus: FieldId::Driver,
        }
    }

    pub fn selector(&self, field: FieldId) -> Option<&Completer> {
        match field {
            FieldId::Driver => Some(&self.driver),
            FieldId::Truck => Some(&self.truck),
            FieldId::Item => Some(&self.item),
            FieldId::Quantity => None,
        }
    }

    pub fn selector_mut(&mut self, field: FieldId) -> Option<&mut Completer> {
        match field {
            FieldId::Driver => Some(&mut self.driver),
            FieldId::Truck => Some(&mut self.truck),
            FieldId::Item => Some(&mut self.item),
            FieldId::Quantity => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.rotate_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.rotate_focus(-1);
    }

    fn rotate_focus(&mut self, delta: isize) {
        let fields = FieldId::ALL;
        let current = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0) as isize;
        let len = fields.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = fields[next];
    }

    /// Re-derives the description from the current item text. A miss is
    /// expected while a prefix is being typed and clears the display
    /// instead of erroring.
    pub fn refresh_description(&mut self, reference: &ReferenceData) {
        self.description = reference
            .description_for(self.item.text())
            .unwrap_or_default()
            .to_owned();
    }

    pub fn draft(&self) -> RequestDraft {
        RequestDraft {
            driver: self.driver.text().to_owned(),
            truck: self.truck.text().to_owned(),
            item: self.item.text().to_owned(),
            quantity_text: self.quantity.clone(),
        }
    }

    /// After a successful submit the item and quantity clear for the next
    /// entry while the driver and truck selections stay put, so repeated
    /// submissions for the same driver/truck are fast.
    pub fn reset_after_submit(&mut self) {
        self.item.clear();
        self.quantity.clear();
        self.description.clear();
    }
}

/// Raw field values captured at submit time, validated into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    pub driver: String,
    pub truck: String,
    pub item: String,
    pub quantity_text: String,
}

impl RequestDraft {
    pub fn finalize(&self, date: Date) -> Result<SubmissionRecord, SubmitError> {
        let quantity = parse_quantity(&self.quantity_text)?;
        if self.driver.trim().is_empty()
            || self.truck.trim().is_empty()
            || self.item.trim().is_empty()
        {
            return Err(SubmitError::MissingSelections);
        }
        Ok(SubmissionRecord {
            date,
            driver: self.driver.clone(),
            truck: self.truck.clone(),
            item: self.item.clone(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldId, RequestForm, SubmitError, parse_quantity};
    use crate::model::ReferenceData;
    use time::{Date, Month};

    fn reference() -> ReferenceData {
        ReferenceData {
            items: [
                ("Widget".to_owned(), "A small widget".to_owned()),
                ("Washer".to_owned(), "Flat zinc washer".to_owned()),
            ]
            .into_iter()
            .collect(),
            drivers: vec!["Pat Walker".to_owned(), "Robin Gray".to_owned()],
            trucks: vec!["Truck 7".to_owned(), "Truck 12".to_owned()],
        }
    }

    fn submit_date() -> Date {
        Date::from_calendar_date(2026, Month::March, 4).expect("valid fixture date")
    }

    #[test]
    fn parse_quantity_accepts_whole_values() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert_eq!(parse_quantity("3.0"), Ok(3));
        assert_eq!(parse_quantity("12\n"), Ok(12));
    }

    #[test]
    fn parse_quantity_rejects_fractional_and_junk_input() {
        assert_eq!(parse_quantity("3.5"), Err(SubmitError::QuantityNotInteger));
        assert_eq!(parse_quantity("abc"), Err(SubmitError::QuantityNotInteger));
        assert_eq!(parse_quantity(""), Err(SubmitError::QuantityNotInteger));
        assert_eq!(parse_quantity("inf"), Err(SubmitError::QuantityNotInteger));
        assert_eq!(parse_quantity("nan"), Err(SubmitError::QuantityNotInteger));
    }

    #[test]
    fn finalize_builds_a_record_from_a_complete_draft() {
        let mut form = RequestForm::new(&reference());
        form.driver.select("Pat Walker");
        form.truck.select("Truck 7");
        form.item.select("Widget");
        form.quantity = "3.0".to_owned();

        let record = form
            .draft()
            .finalize(submit_date())
            .expect("complete draft should finalize");
        assert_eq!(record.driver, "Pat Walker");
        assert_eq!(record.truck, "Truck 7");
        assert_eq!(record.item, "Widget");
        assert_eq!(record.quantity, 3);
    }

    #[test]
    fn finalize_rejects_a_missing_driver() {
        let mut form = RequestForm::new(&reference());
        form.truck.select("Truck 7");
        form.item.select("Widget");
        form.quantity = "2".to_owned();

        assert_eq!(
            form.draft().finalize(submit_date()),
            Err(SubmitError::MissingSelections)
        );
    }

    #[test]
    fn finalize_checks_quantity_before_selections() {
        let form = RequestForm::new(&reference());
        assert_eq!(
            form.draft().finalize(submit_date()),
            Err(SubmitError::QuantityNotInteger)
        );
    }

    #[test]
    fn focus_rotation_wraps_both_directions() {
        let mut form = RequestForm::new(&reference());
        assert_eq!(form.focus, FieldId::Driver);

        form.focus_prev();
        assert_eq!(form.focus, FieldId::Quantity);
        form.focus_next();
        assert_eq!(form.focus, FieldId::Driver);
        form.focus_next();
        assert_eq!(form.focus, FieldId::Truck);
    }

    #[test]
    fn description_follows_the_item_selection() {
        let reference = reference();
        let mut form = RequestForm::new(&reference);

        form.item.select("Widget");
        form.refresh_description(&reference);
        assert_eq!(form.description, "A small widget");

        form.item.select("No Such Item");
        form.refresh_description(&reference);
        assert_eq!(form.description, "");
    }

    #[test]
    fn typed_prefix_updates_description_only_on_full_match() {
        let reference = reference();
        let mut form = RequestForm::new(&reference);

        // "Wa" completes to "Washer", which is a real item.
        form.item.insert_char('w');
        form.item.insert_char('a');
        form.refresh_description(&reference);
        assert_eq!(form.description, "Flat zinc washer");
    }

    #[test]
    fn reset_after_submit_keeps_driver_and_truck() {
        let reference = reference();
        let mut form = RequestForm::new(&reference);
        form.driver.select("Robin Gray");
        form.truck.select("Truck 12");
        form.item.select("Widget");
        form.quantity = "4".to_owned();
        form.refresh_description(&reference);

        form.reset_after_submit();
        assert_eq!(form.driver.text(), "Robin Gray");
        assert_eq!(form.truck.text(), "Truck 12");
        assert_eq!(form.item.text(), "");
        assert_eq!(form.quantity, "");
        assert_eq!(form.description, "");
    }
}
