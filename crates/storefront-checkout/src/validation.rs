//! Checkout form validation.
//!
//! Every rule is evaluated on every run so the form can mark all failing
//! fields at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use storefront_core::CustomerInfo;

use crate::address::AddressSelection;

/// Vietnamese mobile numbers: leading `0`, carrier digit 3/5/7/8/9, 10 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[35789]\d{8}$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Phone,
    Province,
    District,
    Detail,
}

impl FormField {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FormField::FullName => "Vui lòng nhập họ và tên",
            FormField::Phone => "Số điện thoại không hợp lệ (10 số, bắt đầu 03, 05, 07, 08, 09)",
            FormField::Province => "Vui lòng chọn Tỉnh/Thành phố",
            FormField::District => "Vui lòng chọn Quận/Huyện",
            FormField::Detail => "Vui lòng nhập địa chỉ cụ thể",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::FullName => "full_name",
            FormField::Phone => "phone",
            FormField::Province => "province",
            FormField::District => "district",
            FormField::Detail => "detail",
        })
    }
}

/// Field-scoped validation errors, keyed in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn mark(&mut self, field: FormField) {
        self.0.insert(field, field.message());
    }

    /// Returns whether an error was present.
    pub fn clear(&mut self, field: FormField) -> bool {
        self.0.remove(&field).is_some()
    }
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Runs all rules. The ward is never required.
#[must_use]
pub fn validate(customer: &CustomerInfo, address: &AddressSelection) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if customer.full_name.trim().is_empty() {
        errors.mark(FormField::FullName);
    }
    if !is_valid_phone(&customer.phone) {
        errors.mark(FormField::Phone);
    }
    if address.province_id.is_empty() {
        errors.mark(FormField::Province);
    }
    if address.district_id.is_empty() {
        errors.mark(FormField::District);
    }
    if address.detail.trim().is_empty() {
        errors.mark(FormField::Detail);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> (CustomerInfo, AddressSelection) {
        let customer = CustomerInfo {
            full_name: "Nguyễn Văn An".to_string(),
            phone: "0912345678".to_string(),
        };
        let address = AddressSelection {
            province_id: "79".to_string(),
            province_name: "Thành phố Hồ Chí Minh".to_string(),
            district_id: "760".to_string(),
            district_name: "Quận 1".to_string(),
            detail: "12 Lê Lợi".to_string(),
            ..AddressSelection::default()
        };
        (customer, address)
    }

    #[test]
    fn phone_pattern() {
        for ok in ["0312345678", "0512345678", "0712345678", "0812345678", "0912345678"] {
            assert!(is_valid_phone(ok), "{ok} should be valid");
        }
        for bad in ["0212345678", "091234567", "09123456789", "1912345678", "09123a5678", ""] {
            assert!(!is_valid_phone(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn complete_form_has_no_errors() {
        let (customer, address) = complete();
        assert!(validate(&customer, &address).is_empty());
    }

    #[test]
    fn ward_is_never_required() {
        let (customer, address) = complete();
        assert!(address.ward_id.is_empty());
        assert!(validate(&customer, &address).is_empty());
    }

    #[test]
    fn each_missing_field_yields_exactly_its_own_error() {
        let cases: [(FormField, fn(&mut CustomerInfo, &mut AddressSelection)); 5] = [
            (FormField::FullName, |c, _| c.full_name = "   ".to_string()),
            (FormField::Phone, |c, _| c.phone = "12345".to_string()),
            (FormField::Province, |_, a| a.province_id.clear()),
            (FormField::District, |_, a| a.district_id.clear()),
            (FormField::Detail, |_, a| a.detail = "\t".to_string()),
        ];
        for (field, break_it) in cases {
            let (mut customer, mut address) = complete();
            break_it(&mut customer, &mut address);
            let errors = validate(&customer, &address);
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
            assert_eq!(errors.get(field), Some(field.message()));
        }
    }

    #[test]
    fn all_failures_are_reported_together() {
        let errors = validate(&CustomerInfo::default(), &AddressSelection::default());
        assert_eq!(errors.len(), 5);
    }
}
