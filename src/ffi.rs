//! FFI (Foreign Function Interface) bindings for the split calculator
//!
//! This module provides C-compatible functions so a native UI layer
//! can drive the calculator and its input store.

use crate::calculator;
use crate::error::SplitError;
use crate::format::round_money;
use crate::store::SplitStore;
use crate::types::*;
use libc::c_char;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Opaque SplitStore handle for C FFI
pub struct WsStore {
    inner: SplitStore,
}

/// Status codes for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsStatus {
    Ok = 0,
    DivisionByZero = 1,
    NullPointer = 2,
}

impl From<SplitError> for WsStatus {
    fn from(e: SplitError) -> Self {
        match e {
            SplitError::DivisionByZero => WsStatus::DivisionByZero,
        }
    }
}

/// Result structure for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WsResult {
    pub grand_total: Amount,
    pub per_person: Amount,
}

impl From<BillResult> for WsResult {
    fn from(r: BillResult) -> Self {
        Self { grand_total: r.grand_total, per_person: r.per_person }
    }
}

// ============================================
// Calculator FFI Functions
// ============================================

/// Compute the grand total and per-person share
///
/// # Safety
/// `out` must be null or point to writable memory for one `WsResult`
#[no_mangle]
pub unsafe extern "C" fn wesplit_compute(
    check_amount: Amount,
    party_size: PartySize,
    tip_percentage: TipPercentage,
    out: *mut WsResult,
) -> WsStatus {
    if out.is_null() {
        return WsStatus::NullPointer;
    }

    match calculator::compute(check_amount, party_size, tip_percentage) {
        Ok(result) => {
            *out = result.into();
            WsStatus::Ok
        }
        Err(e) => e.into(),
    }
}

// ============================================
// Store FFI Functions
// ============================================

/// Create a new store with default settings
///
/// # Safety
/// Returns a raw pointer that must be freed with `wesplit_store_destroy`
#[no_mangle]
pub extern "C" fn wesplit_store_create() -> *mut WsStore {
    let store = Box::new(WsStore {
        inner: SplitStore::default(),
    });
    Box::into_raw(store)
}

/// Destroy a store
///
/// # Safety
/// The pointer must be valid and must have been created by `wesplit_store_create`
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_destroy(store: *mut WsStore) {
    if !store.is_null() {
        drop(Box::from_raw(store));
    }
}

/// Set the check amount
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_set_check_amount(store: *mut WsStore, amount: Amount) -> bool {
    if store.is_null() {
        return false;
    }

    let store = &mut *store;
    store.inner.set_check_amount(amount);
    true
}

/// Set the party size; returns the clamped size that was stored, 0 on null
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_set_party_size(
    store: *mut WsStore,
    party_size: PartySize,
) -> PartySize {
    if store.is_null() {
        return 0;
    }

    let store = &mut *store;
    store.inner.set_party_size(party_size)
}

/// Select a tip percentage; false if it is not one of the offered tips
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_set_tip_percentage(
    store: *mut WsStore,
    tip_percentage: TipPercentage,
) -> bool {
    if store.is_null() {
        return false;
    }

    let store = &mut *store;
    store.inner.set_tip_percentage(tip_percentage)
}

/// Get the grand total
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_grand_total(store: *const WsStore) -> Amount {
    if store.is_null() {
        return Amount::NAN;
    }

    let store = &*store;
    store.inner.result().map(|r| r.grand_total).unwrap_or(Amount::NAN)
}

/// Get the per-person share
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_per_person(store: *const WsStore) -> Amount {
    if store.is_null() {
        return Amount::NAN;
    }

    let store = &*store;
    store.inner.result().map(|r| r.per_person).unwrap_or(Amount::NAN)
}

/// Handle the "Done" action on the amount field
///
/// # Safety
/// The store pointer must be valid
#[no_mangle]
pub unsafe extern "C" fn wesplit_store_dismiss_input(store: *mut WsStore) -> bool {
    if store.is_null() {
        return false;
    }

    let store = &mut *store;
    store.inner.dismiss_input();
    true
}

// ============================================
// Utility Functions
// ============================================

/// Convert an amount to whole cents, rounding half away from zero
#[no_mangle]
pub extern "C" fn wesplit_amount_to_cents(amount: Amount) -> i64 {
    let cents = round_money(amount, 2)
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|cents| cents.to_i64());

    match cents {
        Some(cents) => cents,
        None if amount.is_nan() => 0,
        None if amount > 0.0 => i64::MAX,
        None => i64::MIN,
    }
}

/// Convert whole cents to an amount
#[no_mangle]
pub extern "C" fn wesplit_amount_from_cents(cents: i64) -> Amount {
    cents as Amount / 100.0
}

/// Get library version
#[no_mangle]
pub extern "C" fn wesplit_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
