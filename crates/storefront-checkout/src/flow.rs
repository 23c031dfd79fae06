//! The checkout state machine.
//!
//! ```text
//! CollectingInfo ─submit─▶ Validating ─▶ Submitting ─┬▶ RedirectingToPaymentGateway
//!        ▲                     │              │       └▶ Success
//!        └──── edit ◀── Failed ◀──────────────┘
//! ```
//!
//! The cart is read once at mount. A confirmed order clears both the
//! persisted cart and the snapshot; a gateway redirect (PAYOS only) leaves
//! the cart for the return page to clear.

use std::fmt;
use std::time::Duration;

use storefront_cart::{CartError, CartStore};
use storefront_client::{AddressDirectory, AddressLevel, ApiError, StorefrontClient};
use storefront_core::{CartItem, CustomerInfo, OrderPlacement, OrderRequest, PaymentMethod, Region};

use crate::address::{format_address, AddressPicker, AddressSelection, LookupOutcome, LookupTicket};
use crate::error::CheckoutError;
use crate::notice::Notice;
use crate::validation::{validate, FieldErrors, FormField};

const EMPTY_CART: &str = "Giỏ hàng của bạn đang trống!";
const INVALID_FORM: &str = "Vui lòng kiểm tra lại các thông tin bị đánh dấu đỏ!";
const ORDER_PLACED: &str = "Đặt hàng thành công!";
const PROVINCES_UNAVAILABLE: &str = "Không thể tải danh sách tỉnh thành.";
const DISTRICTS_UNAVAILABLE: &str = "Không thể tải danh sách quận/huyện.";
const WARDS_UNAVAILABLE: &str = "Không thể tải danh sách phường/xã.";
const PAYMENT_CANCELLED: &str = "Bạn đã hủy thanh toán. Giỏ hàng vẫn được giữ nguyên.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    CollectingInfo,
    Validating,
    Submitting,
    RedirectingToPaymentGateway,
    Success,
    /// Validation or submission failed. The next edit, selection or submit
    /// returns to `CollectingInfo` with all input intact.
    Failed,
}

impl CheckoutPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutPhase::CollectingInfo => "collecting_info",
            CheckoutPhase::Validating => "validating",
            CheckoutPhase::Submitting => "submitting",
            CheckoutPhase::RedirectingToPaymentGateway => "redirecting_to_payment_gateway",
            CheckoutPhase::Success => "success",
            CheckoutPhase::Failed => "failed",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, CheckoutPhase::RedirectingToPaymentGateway | CheckoutPhase::Success)
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The order-success page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSuccessView {
    pub order_code: Option<String>,
}

impl OrderSuccessView {
    pub const TITLE: &'static str = "Thanh Toán Thành Công!";
    pub const BODY: &'static str = "Cảm ơn bạn đã tin tưởng mua sắm. Đơn hàng của bạn đang chờ xác nhận và sẽ được gửi đi trong thời gian sớm nhất.";
    pub const REMINDER: &'static str =
        "Vui lòng lưu lại hoặc chụp màn hình mã đơn hàng này để tra cứu trạng thái giao hàng nhé!";

    #[must_use]
    pub fn new(order_code: Option<String>) -> Self {
        Self { order_code }
    }
}

impl fmt::Display for OrderSuccessView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        write!(f, "{}", Self::BODY)?;
        if let Some(code) = &self.order_code {
            write!(f, "\nMã đơn hàng của bạn là: #{code}\n{}", Self::REMINDER)?;
        }
        Ok(())
    }
}

/// Where the shopper goes after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the storefront for the payment gateway.
    External { url: String },
    /// Show the order-success view once `after` has elapsed.
    OrderSuccess {
        view: OrderSuccessView,
        after: Duration,
    },
}

#[derive(Debug)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    items: Vec<CartItem>,
    customer: CustomerInfo,
    picker: AddressPicker,
    errors: FieldErrors,
    notices: Vec<Notice>,
    redirect_delay: Duration,
}

impl CheckoutFlow {
    /// Snapshots the cart and starts the province lookup. The caller runs
    /// the lookup and hands the result to [`CheckoutFlow::apply_lookup`];
    /// [`CheckoutFlow::load_provinces`] does both.
    pub fn mount(cart: &CartStore, redirect_delay: Duration) -> (Self, LookupTicket) {
        let mut picker = AddressPicker::new();
        let ticket = picker.begin_provinces();
        let flow = Self {
            phase: CheckoutPhase::CollectingInfo,
            items: cart.items(),
            customer: CustomerInfo::default(),
            picker,
            errors: FieldErrors::default(),
            notices: Vec::new(),
            redirect_delay,
        };
        tracing::debug!(lines = flow.items.len(), "checkout mounted");
        (flow, ticket)
    }

    #[must_use]
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Whether the form accepts input.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self.phase, CheckoutPhase::CollectingInfo | CheckoutPhase::Failed)
    }

    /// Cart lines as read at mount.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(0, i64::saturating_add)
    }

    #[must_use]
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    #[must_use]
    pub fn picker(&self) -> &AddressPicker {
        &self.picker
    }

    #[must_use]
    pub fn address(&self) -> &AddressSelection {
        self.picker.selection()
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Drains notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn touch(&mut self) {
        if self.phase == CheckoutPhase::Failed {
            self.phase = CheckoutPhase::CollectingInfo;
        }
    }

    fn edit(&mut self, field: FormField) {
        self.touch();
        self.errors.clear(field);
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.customer.full_name = value.into();
        self.edit(FormField::FullName);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.customer.phone = value.into();
        self.edit(FormField::Phone);
    }

    pub fn set_detail(&mut self, value: impl Into<String>) {
        self.picker.set_detail(value);
        self.edit(FormField::Detail);
    }

    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded province.
    pub fn select_province(&mut self, id: &str) -> Result<Option<LookupTicket>, CheckoutError> {
        let ticket = self.picker.select_province(id)?;
        self.edit(FormField::Province);
        Ok(ticket)
    }

    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded district.
    pub fn select_district(&mut self, id: &str) -> Result<Option<LookupTicket>, CheckoutError> {
        let ticket = self.picker.select_district(id)?;
        self.edit(FormField::District);
        Ok(ticket)
    }

    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded ward.
    pub fn select_ward(&mut self, id: &str) -> Result<(), CheckoutError> {
        self.picker.select_ward(id)?;
        self.touch();
        Ok(())
    }

    /// Feeds a lookup result back in. Stale results are dropped silently;
    /// failures raise one notice and leave the selector empty. Returns
    /// whether the result was applied.
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Vec<Region>, ApiError>,
    ) -> bool {
        match self.picker.apply(ticket, result) {
            LookupOutcome::Applied(_) => true,
            LookupOutcome::Stale => false,
            LookupOutcome::Failed(_) => {
                let message = match ticket.level() {
                    AddressLevel::Province => PROVINCES_UNAVAILABLE,
                    AddressLevel::District => DISTRICTS_UNAVAILABLE,
                    AddressLevel::Ward => WARDS_UNAVAILABLE,
                };
                self.notices.push(Notice::error(message));
                true
            }
        }
    }

    /// Runs a lookup for `ticket` and applies the result.
    pub async fn run_lookup<D: AddressDirectory>(
        &mut self,
        ticket: LookupTicket,
        directory: &D,
    ) -> bool {
        let result = match ticket.level() {
            AddressLevel::Province => directory.provinces().await,
            AddressLevel::District => directory.districts(ticket.parent_id()).await,
            AddressLevel::Ward => directory.wards(ticket.parent_id()).await,
        };
        self.apply_lookup(&ticket, result)
    }

    /// Re-runs the top-level lookup, e.g. after a failure at mount.
    pub async fn load_provinces<D: AddressDirectory>(&mut self, directory: &D) -> bool {
        let ticket = self.picker.begin_provinces();
        self.run_lookup(ticket, directory).await
    }

    /// Selects a province and waits for its districts.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded province.
    pub async fn choose_province<D: AddressDirectory>(
        &mut self,
        id: &str,
        directory: &D,
    ) -> Result<(), CheckoutError> {
        if let Some(ticket) = self.select_province(id)? {
            self.run_lookup(ticket, directory).await;
        }
        Ok(())
    }

    /// Selects a district and waits for its wards.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownRegion`] if `id` is not a loaded district.
    pub async fn choose_district<D: AddressDirectory>(
        &mut self,
        id: &str,
        directory: &D,
    ) -> Result<(), CheckoutError> {
        if let Some(ticket) = self.select_district(id)? {
            self.run_lookup(ticket, directory).await;
        }
        Ok(())
    }

    fn order_request(&self, method: PaymentMethod) -> OrderRequest {
        OrderRequest {
            full_name: self.customer.full_name.trim().to_string(),
            phone: self.customer.phone.trim().to_string(),
            address: format_address(self.picker.selection()),
            payment_method: method,
            items: self.items.clone(),
        }
    }

    /// Validates and places the order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Finished`]: a previous submit already succeeded.
    /// - [`CheckoutError::EmptyCart`]: nothing to order; no request is sent.
    /// - [`CheckoutError::Invalid`]: one or more fields failed; all of them
    ///   are marked and no request is sent.
    /// - [`CheckoutError::Api`]: the backend rejected the order or could not
    ///   be reached; input is preserved for a retry.
    pub async fn submit(
        &mut self,
        method: PaymentMethod,
        client: &StorefrontClient,
        cart: &CartStore,
    ) -> Result<Navigation, CheckoutError> {
        if self.phase.is_terminal() {
            return Err(CheckoutError::Finished {
                phase: self.phase.as_str(),
            });
        }

        self.phase = CheckoutPhase::Validating;
        if self.items.is_empty() {
            self.notices.push(Notice::error(EMPTY_CART));
            self.phase = CheckoutPhase::CollectingInfo;
            return Err(CheckoutError::EmptyCart);
        }

        let errors = validate(&self.customer, self.picker.selection());
        if !errors.is_empty() {
            let fields = errors.fields().collect();
            self.errors = errors;
            self.notices.push(Notice::error(INVALID_FORM));
            self.phase = CheckoutPhase::Failed;
            return Err(CheckoutError::Invalid { fields });
        }

        let order = self.order_request(method);
        self.phase = CheckoutPhase::Submitting;
        match client.create_order(&order).await {
            Ok(OrderPlacement::Gateway {
                order_code,
                checkout_url,
            }) if method == PaymentMethod::PayOs => {
                tracing::info!(
                    order_code = order_code.as_deref().unwrap_or("-"),
                    "redirecting to payment gateway"
                );
                self.phase = CheckoutPhase::RedirectingToPaymentGateway;
                Ok(Navigation::External { url: checkout_url })
            }
            // A checkout URL only redirects for the gateway method; COD is
            // confirmed whatever else the backend returns.
            Ok(
                OrderPlacement::Confirmed { order_code }
                | OrderPlacement::Gateway { order_code, .. },
            ) => {
                // The order is already placed; a failed clear is logged only.
                if let Err(e) = cart.clear() {
                    tracing::warn!(error = %e, "order placed but cart could not be cleared");
                }
                self.items.clear();
                self.notices.push(Notice::success(ORDER_PLACED));
                self.phase = CheckoutPhase::Success;
                Ok(Navigation::OrderSuccess {
                    view: OrderSuccessView::new(order_code),
                    after: self.redirect_delay,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, method = %method, "order submission failed");
                self.notices.push(Notice::error(e.user_message()));
                self.phase = CheckoutPhase::Failed;
                Err(e.into())
            }
        }
    }
}

/// Landing from the payment gateway after a completed payment: the cart is
/// cleared and the success view shown.
///
/// # Errors
///
/// Returns [`CartError`] if the cart cannot be cleared.
pub fn confirm_gateway_return(
    cart: &CartStore,
    order_code: Option<String>,
) -> Result<OrderSuccessView, CartError> {
    cart.clear()?;
    tracing::info!(
        order_code = order_code.as_deref().unwrap_or("-"),
        "payment confirmed by gateway"
    );
    Ok(OrderSuccessView::new(order_code))
}

/// Landing from the payment gateway after the shopper abandoned payment.
/// The cart is kept so the order can be retried.
#[must_use]
pub fn gateway_cancelled() -> Notice {
    Notice::info(PAYMENT_CANCELLED)
}
