//! Add-youth dialog state and its required-field validation.

use std::fmt;

use crate::CreateYouthRequest;

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";
pub const YOUTH_ADDED_MESSAGE: &str = "Youth added successfully!";

/// The five user-editable youth fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YouthField {
    FirstName,
    LastName,
    Birthday,
    Address,
    EducationLevel,
}

impl YouthField {
    pub const ALL: [YouthField; 5] = [
        YouthField::FirstName,
        YouthField::LastName,
        YouthField::Birthday,
        YouthField::Address,
        YouthField::EducationLevel,
    ];

    /// Input name, matching the JSON key
    pub fn name(&self) -> &'static str {
        match self {
            YouthField::FirstName => "firstName",
            YouthField::LastName => "lastName",
            YouthField::Birthday => "birthday",
            YouthField::Address => "address",
            YouthField::EducationLevel => "educationLevel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YouthField::FirstName => "First Name",
            YouthField::LastName => "Last Name",
            YouthField::Birthday => "Birthday",
            YouthField::Address => "Address",
            YouthField::EducationLevel => "Education Level",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            YouthField::FirstName => "Enter first name",
            YouthField::LastName => "Enter last name",
            YouthField::Birthday => "",
            YouthField::Address => "Enter address",
            YouthField::EducationLevel => "Enter education level",
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            YouthField::Birthday => "date",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidationError {
    MissingFields,
}

impl fmt::Display for FormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValidationError::MissingFields => f.write_str(REQUIRED_FIELDS_MESSAGE),
        }
    }
}

impl std::error::Error for FormValidationError {}

/// Form contents, seeded with the creator identity from the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouthForm {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
    pub address: String,
    pub education_level: String,
}

impl YouthForm {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: YouthField) -> &str {
        match field {
            YouthField::FirstName => &self.first_name,
            YouthField::LastName => &self.last_name,
            YouthField::Birthday => &self.birthday,
            YouthField::Address => &self.address,
            YouthField::EducationLevel => &self.education_level,
        }
    }

    pub fn set(&mut self, field: YouthField, value: impl Into<String>) {
        let value = value.into();
        match field {
            YouthField::FirstName => self.first_name = value,
            YouthField::LastName => self.last_name = value,
            YouthField::Birthday => self.birthday = value,
            YouthField::Address => self.address = value,
            YouthField::EducationLevel => self.education_level = value,
        }
    }

    /// Build the create request, or fail if any field is blank
    pub fn validate(&self) -> Result<CreateYouthRequest, FormValidationError> {
        let request = CreateYouthRequest {
            user_id: self.user_id.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            birthday: self.birthday.trim().to_string(),
            address: self.address.trim().to_string(),
            education_level: self.education_level.trim().to_string(),
        };
        if request.has_blank_field() {
            return Err(FormValidationError::MissingFields);
        }
        Ok(request)
    }
}

/// What the dialog's host should do after a submission attempt settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Refresh the list and close the dialog
    Created,
    /// Stay open and show the error
    Failed,
}

/// Dialog state: the form, a single inline error and the in-flight flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddYouthDialogModel {
    pub form: YouthForm,
    error: Option<String>,
    submitting: bool,
}

impl AddYouthDialogModel {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            form: YouthForm::new(user_id),
            error: None,
            submitting: false,
        }
    }

    pub fn set_field(&mut self, field: YouthField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate and, when valid, enter the submitting state and hand back
    /// the request to send. A validation failure replaces the current
    /// error and sends nothing.
    pub fn begin_submit(&mut self) -> Option<CreateYouthRequest> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(request) => {
                self.submitting = true;
                self.error = None;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<(), String>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.form = YouthForm::new(self.form.user_id.clone());
                self.error = None;
                SubmitOutcome::Created
            }
            Err(message) => {
                self.error = Some(message);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}
