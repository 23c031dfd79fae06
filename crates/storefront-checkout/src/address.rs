//! The province → district → ward cascade.
//!
//! Each level is a small state machine (`Unselected`, `Loading`,
//! `Populated`). Selecting a parent starts a lookup for the children and
//! hands back a [`LookupTicket`] naming the parent it was issued for. The
//! lookup runs without borrowing the picker, so several may be in flight;
//! [`AddressPicker::apply`] drops any result whose parent is no longer the
//! current selection.

use storefront_client::{AddressLevel, ApiError};
use storefront_core::Region;

use crate::error::CheckoutError;

/// Parent id the provider uses for the top level.
const ROOT_PARENT: &str = "0";

/// The delivery address being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSelection {
    pub province_id: String,
    pub province_name: String,
    pub district_id: String,
    pub district_name: String,
    pub ward_id: String,
    pub ward_name: String,
    pub detail: String,
}

impl AddressSelection {
    fn clear_district(&mut self) {
        self.district_id.clear();
        self.district_name.clear();
        self.clear_ward();
    }

    fn clear_ward(&mut self) {
        self.ward_id.clear();
        self.ward_name.clear();
    }
}

/// `detail, [ward, ]district, province`. The ward segment and its separator
/// are omitted when no ward is selected.
#[must_use]
pub fn format_address(selection: &AddressSelection) -> String {
    let mut parts = vec![selection.detail.trim()];
    if !selection.ward_name.is_empty() {
        parts.push(&selection.ward_name);
    }
    parts.push(&selection.district_name);
    parts.push(&selection.province_name);
    parts.join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Unselected,
    Loading,
    Populated,
}

/// Option list backing one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOptions {
    level: AddressLevel,
    state: LevelState,
    options: Vec<Region>,
}

impl RegionOptions {
    fn new(level: AddressLevel) -> Self {
        Self {
            level,
            state: LevelState::Unselected,
            options: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.state = LevelState::Unselected;
        self.options.clear();
    }

    fn start_loading(&mut self) {
        self.state = LevelState::Loading;
        self.options.clear();
    }

    #[must_use]
    pub fn state(&self) -> LevelState {
        self.state
    }

    #[must_use]
    pub fn options(&self) -> &[Region] {
        &self.options
    }

    /// A selector cannot be used while loading or when it has nothing to offer.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state == LevelState::Loading || self.options.is_empty()
    }

    /// Label shown in the empty slot of the selector.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        if self.state == LevelState::Loading {
            return "Đang tải...";
        }
        match self.level {
            AddressLevel::Province => "Chọn Tỉnh/Thành",
            AddressLevel::District => "Chọn Quận/Huyện",
            AddressLevel::Ward => "Chọn Phường/Xã",
        }
    }

    fn find(&self, id: &str) -> Option<&Region> {
        self.options.iter().find(|r| r.id == id)
    }
}

/// Identifies one outstanding lookup by level and the parent it was issued
/// for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    level: AddressLevel,
    parent_id: String,
}

impl LookupTicket {
    #[must_use]
    pub fn level(&self) -> AddressLevel {
        self.level
    }

    #[must_use]
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }
}

/// What [`AddressPicker::apply`] did with a lookup result.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The option list now holds this many regions.
    Applied(usize),
    /// The selection moved on; the result was dropped.
    Stale,
    /// The lookup failed; the selector is left empty.
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPicker {
    selection: AddressSelection,
    provinces: RegionOptions,
    districts: RegionOptions,
    wards: RegionOptions,
}

impl Default for AddressPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressPicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: AddressSelection::default(),
            provinces: RegionOptions::new(AddressLevel::Province),
            districts: RegionOptions::new(AddressLevel::District),
            wards: RegionOptions::new(AddressLevel::Ward),
        }
    }

    #[must_use]
    pub fn selection(&self) -> &AddressSelection {
        &self.selection
    }

    #[must_use]
    pub fn provinces(&self) -> &RegionOptions {
        &self.provinces
    }

    #[must_use]
    pub fn districts(&self) -> &RegionOptions {
        &self.districts
    }

    #[must_use]
    pub fn wards(&self) -> &RegionOptions {
        &self.wards
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.selection.detail = detail.into();
    }

    /// Starts the top-level lookup.
    pub fn begin_provinces(&mut self) -> LookupTicket {
        self.provinces.start_loading();
        LookupTicket {
            level: AddressLevel::Province,
            parent_id: ROOT_PARENT.to_string(),
        }
    }

    /// Selects a province (an empty id clears it). District and ward
    /// selections and option lists are always cleared; a ticket for the
    /// district lookup is returned when a province was chosen.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded option.
    pub fn select_province(&mut self, id: &str) -> Result<Option<LookupTicket>, CheckoutError> {
        let chosen = Self::resolve(&self.provinces, "province", id)?;
        self.selection.clear_district();
        self.wards.reset();
        match chosen {
            Some(region) => {
                self.selection.province_id = region.id;
                self.selection.province_name = region.full_name;
                self.districts.start_loading();
                Ok(Some(LookupTicket {
                    level: AddressLevel::District,
                    parent_id: self.selection.province_id.clone(),
                }))
            }
            None => {
                self.selection.province_id.clear();
                self.selection.province_name.clear();
                self.districts.reset();
                Ok(None)
            }
        }
    }

    /// Selects a district (an empty id clears it). The ward is always
    /// cleared; a ticket for the ward lookup is returned when a district was
    /// chosen.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded option.
    pub fn select_district(&mut self, id: &str) -> Result<Option<LookupTicket>, CheckoutError> {
        let chosen = Self::resolve(&self.districts, "district", id)?;
        self.selection.clear_ward();
        match chosen {
            Some(region) => {
                self.selection.district_id = region.id;
                self.selection.district_name = region.full_name;
                self.wards.start_loading();
                Ok(Some(LookupTicket {
                    level: AddressLevel::Ward,
                    parent_id: self.selection.district_id.clone(),
                }))
            }
            None => {
                self.selection.district_id.clear();
                self.selection.district_name.clear();
                self.wards.reset();
                Ok(None)
            }
        }
    }

    /// Selects a ward (an empty id clears it). Nothing cascades.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded option.
    pub fn select_ward(&mut self, id: &str) -> Result<(), CheckoutError> {
        match Self::resolve(&self.wards, "ward", id)? {
            Some(region) => {
                self.selection.ward_id = region.id;
                self.selection.ward_name = region.full_name;
            }
            None => self.selection.clear_ward(),
        }
        Ok(())
    }

    fn resolve(
        options: &RegionOptions,
        level: &'static str,
        id: &str,
    ) -> Result<Option<Region>, CheckoutError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }
        options
            .find(id)
            .cloned()
            .map(Some)
            .ok_or_else(|| CheckoutError::UnknownRegion {
                level,
                id: id.to_string(),
            })
    }

    /// Applies a lookup result if `ticket` still matches the current
    /// selection of its parent level.
    pub fn apply(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Vec<Region>, ApiError>,
    ) -> LookupOutcome {
        let (current_parent, target) = match ticket.level {
            AddressLevel::Province => (ROOT_PARENT, &mut self.provinces),
            AddressLevel::District => (self.selection.province_id.as_str(), &mut self.districts),
            AddressLevel::Ward => (self.selection.district_id.as_str(), &mut self.wards),
        };
        if current_parent != ticket.parent_id {
            tracing::debug!(
                level = %ticket.level,
                parent_id = %ticket.parent_id,
                current = %current_parent,
                "discarding stale address lookup"
            );
            return LookupOutcome::Stale;
        }
        target.state = LevelState::Populated;
        match result {
            Ok(regions) => {
                target.options = regions;
                LookupOutcome::Applied(target.options.len())
            }
            Err(e) => {
                tracing::warn!(
                    level = %ticket.level,
                    parent_id = %ticket.parent_id,
                    error = %e,
                    "address lookup failed"
                );
                target.options.clear();
                LookupOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
