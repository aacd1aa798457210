//! # ITEMAPI CORE LIBRARY
//!
//! **TYPED REQUEST VALIDATION AND RESPONSE SHAPING FOR A SMALL ITEM API**
//!
//! **ARCHITECTURE**: Declarative field schemas consumed by one generic validator
//! **GUARANTEE**: Stateless, panic-free validation; every failing field reported at once

pub mod api;
pub mod errors;
pub mod handlers;
pub mod records;
pub mod request;
pub mod response;

// **VALIDATION MODULE REGISTRATION**
pub mod validation;
