//! Operation table for the remote DailyInfo service.
//!
//! Each remote method is a zero-sized type implementing [`Operation`]; its
//! descriptor names the method, the XML element that carries the answer, and
//! how results are cached. The request and response shapes ride along as
//! associated types so the pipeline stays generic over one descriptor.

#[macro_use]
mod macros;

pub mod currency;
pub mod info;
pub mod liquidity;
pub mod market;
pub mod rates;
pub mod requests;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gateway::cache::CacheKey;
use requests::{CursDynamic, DateRange, Empty, EnumValutesRequest, OnDate, RequestShape};

/// How results of an operation age in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CachePolicy {
    /// Refetched once older than the configured TTL.
    Ttl,
    /// Parameterless snapshot, replaced only by a forced refresh.
    Snapshot,
}

/// Static description of one remote method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub target_node: &'static str,
    pub cache_policy: CachePolicy,
}

impl OperationDescriptor {
    /// Cache key for a request body. Snapshots ignore the body.
    pub fn cache_key(&self, raw_body: &[u8]) -> CacheKey {
        match self.cache_policy {
            CachePolicy::Ttl => CacheKey::new(self.name, String::from_utf8_lossy(raw_body)),
            CachePolicy::Snapshot => CacheKey::new(self.name, ""),
        }
    }

    pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
        OPERATIONS.iter().find(|descriptor| descriptor.name == name)
    }
}

/// A remote method with typed request and response.
pub trait Operation: Send + Sync + 'static {
    const DESCRIPTOR: OperationDescriptor;
    type Request: RequestShape;
    type Response: Sanitize + Serialize + DeserializeOwned + Send + Sync + 'static;
}

/// Post-decode cleanup of text the remote service pads.
pub trait Sanitize {
    fn sanitize(&mut self);
}

/// Strip surrounding whitespace and control characters in place.
pub fn clean_text(text: &mut String) {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    if trimmed.len() != text.len() {
        *text = trimmed.to_string();
    }
}

/// Receives every operation type in the table.
pub trait OperationVisitor {
    fn visit<O: Operation>(&mut self);
}

macro_rules! operation_table {
    (
        $(
            $(#[$meta:meta])*
            $ty:ident => $name:literal, $node:literal, $policy:ident, $request:ty, $response:ty;
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $ty;

            impl Operation for $ty {
                const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
                    name: $name,
                    target_node: $node,
                    cache_policy: CachePolicy::$policy,
                };
                type Request = $request;
                type Response = $response;
            }
        )*

        /// Descriptors of every exposed operation.
        pub static OPERATIONS: &[OperationDescriptor] = &[
            $( <$ty as Operation>::DESCRIPTOR, )*
        ];

        /// Hand each operation type to `visitor`.
        pub fn visit_all<V: OperationVisitor>(visitor: &mut V) {
            $( visitor.visit::<$ty>(); )*
        }
    };
}

operation_table! {
    /// Official exchange rates on a date.
    GetCursOnDateXml => "GetCursOnDateXML", "ValuteData", Ttl, OnDate, currency::CursOnDateData;
    /// Rate history of one currency.
    GetCursDynamicXml => "GetCursDynamicXML", "ValuteData", Ttl, CursDynamic, currency::CursDynamicData;
    /// Currency directory.
    EnumValutesXml => "EnumValutesXML", "ValuteData", Ttl, EnumValutesRequest, currency::EnumValutesData;
    KeyRateXml => "KeyRateXML", "KeyRate", Ttl, DateRange, rates::KeyRateData;
    DragMetDynamicXml => "DragMetDynamicXML", "DragMetall", Ttl, DateRange, market::DragMetallData;
    NewsInfoXml => "NewsInfoXML", "NewsInfo", Ttl, DateRange, info::NewsInfoData;
    SwapDynamicXml => "SwapDynamicXML", "SwapDynamic", Ttl, DateRange, market::SwapDynamicData;
    DepoDynamicXml => "DepoDynamicXML", "DepoDynamic", Ttl, DateRange, rates::DepoDynamicData;
    OstatDynamicXml => "OstatDynamicXML", "OstatDynamic", Ttl, DateRange, liquidity::OstatDynamicData;
    OstatDepoXml => "OstatDepoXML", "OD", Ttl, DateRange, liquidity::OstatDepoData;
    MrrfXml => "MrrfXML", "mmrf", Ttl, DateRange, liquidity::MrrfData;
    Mrrf7dXml => "Mrrf7DXML", "mmrf7d", Ttl, DateRange, liquidity::Mrrf7dData;
    SaldoXml => "SaldoXML", "Saldo", Ttl, DateRange, liquidity::SaldoData;
    RuoniaXml => "RuoniaXML", "Ruonia", Ttl, DateRange, rates::RuoniaData;
    RoisFixXml => "ROISfixXML", "ROISfix", Ttl, DateRange, rates::RoisFixData;
    MkrXml => "MKRXML", "mkr_base", Ttl, DateRange, rates::MkrData;
    DvXml => "DVXML", "DV_base", Ttl, DateRange, liquidity::DvData;
    RepoDebtXml => "Repo_debtXML", "Repo_debt", Ttl, DateRange, market::RepoDebtData;
    CoinsBaseXml => "Coins_baseXML", "Coins_base", Ttl, DateRange, market::CoinsBaseData;
    FixingBaseXml => "FixingBaseXML", "FixingBase", Ttl, DateRange, rates::FixingBaseData;
    OvernightXml => "OvernightXML", "Overnight", Ttl, DateRange, rates::OvernightData;
    BauctionXml => "BauctionXML", "BAuction", Ttl, DateRange, market::BauctionData;
    SwapDayTotalXml => "SwapDayTotalXML", "SwapDayTotal", Ttl, DateRange, market::SwapDayTotalData;
    SwapMonthTotalXml => "SwapMonthTotalXML", "SwapMonthTotal", Ttl, DateRange, market::SwapMonthTotalData;
    SwapInfoSellXml => "SwapInfoSellXML", "SwapInfoSell", Ttl, DateRange, market::SwapInfoSellData;
    BiCurBaseXml => "BiCurBaseXML", "BiCurBase", Ttl, DateRange, currency::BiCurBaseData;
    RepoDebtUsdXml => "RepoDebtUSDXML", "RepoDebtUSD", Ttl, DateRange, market::RepoDebtUsdData;
    /// Current dual-currency basket composition.
    BiCurBacketXml => "BiCurBacketXML", "BiCurBacket", Snapshot, Empty, currency::BiCurBacketData;
    /// Headline indicators.
    MainInfoXml => "MainInfoXML", "RegData", Snapshot, Empty, info::MainInfoData;
}
