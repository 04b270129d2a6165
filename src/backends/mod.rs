//! Per-tier kernel implementations
//!
//! Each module holds the kernels legal to run at one capability tier.
//! Coverage is deliberately ragged — a tier only gets a kernel where its
//! instruction set actually buys something — so dispatch in [`crate::algo`]
//! falls through to the next tier down, ending at `scalar`, which is
//! complete and portable.
//!
//! # Safety
//!
//! All `unsafe` code lives here. Every SIMD kernel is gated with
//! `#[target_feature]` and must only be called after the corresponding
//! [`crate::Tier`] has been confirmed enabled; the safe dispatch layer in
//! [`crate::algo`] is the only intended caller.
//!
//! # Tiers
//!
//! - `scalar`: portable baseline, every operation
//! - `sse2`: x86_64 baseline SIMD (128-bit)
//! - `sse42`: SSE4.2 string-compare search
//! - `avx2`: x86_64 advanced SIMD (256-bit)

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod sse42;

#[cfg(target_arch = "x86_64")]
pub mod avx2;
