//! Precious metals, swaps, repo and auction responses.

record! {
    /// Accounting price of one precious metal.
    pub struct DragMetRow {
        date: "DateMet",
        metal: "CodMet",
        price: "price",
    }
}

listing! {
    pub struct DragMetallData { rows: "DrgMet" => DragMetRow }
}

record! {
    /// FX swap terms.
    pub struct SwapRow {
        date_buy: "DateBuy",
        date_sell: "DateSell",
        base_rate: "BaseRate",
        swap_difference: "SD",
        rate: "TIR",
        stavka: "Stavka",
        limit: "limit",
    }
}

listing! {
    pub struct SwapDynamicData { rows: "Swap" => SwapRow }
}

record! {
    pub struct SwapDayTotalRow {
        date: "DT",
        swap: "Swap",
    }
}

listing! {
    pub struct SwapDayTotalData { rows: "SDT" => SwapDayTotalRow }
}

record! {
    pub struct SwapMonthTotalRow {
        date: "D0",
        rub: "RUB",
        usd: "USD",
    }
}

listing! {
    pub struct SwapMonthTotalData { rows: "SMT" => SwapMonthTotalRow }
}

record! {
    /// Currency sold by the regulator under swap.
    pub struct SwapInfoSellRow {
        currency: "Currency",
        date_buy: "DateBuy",
        date_sell: "DateSell",
        date_spot: "DateSPOT",
        kind: "Type",
        base_rate: "BaseRate",
        swap_difference: "SD",
        rate: "TIR",
        stavka: "Stavka",
        limit: "limit",
    }
}

listing! {
    pub struct SwapInfoSellData { rows: "SSU" => SwapInfoSellRow }
}

record! {
    /// Outstanding repo debt.
    pub struct RepoDebtRow {
        date: "Date",
        debt: "debt",
        debt_auction: "debt_auc",
        debt_fixed: "debt_fix",
    }
}

listing! {
    pub struct RepoDebtData { rows: "RD" => RepoDebtRow }
}

record! {
    pub struct RepoDebtUsdRow {
        date: "D0",
        total: "TP",
    }
}

listing! {
    pub struct RepoDebtUsdData { rows: "rd" => RepoDebtUsdRow }
}

record! {
    /// Budget funds auction result.
    pub struct BauctionRow {
        date: "date",
        public_name: "Public_Name",
        sum: "Sum",
        kind: "Type",
        rate: "Rate",
    }
}

listing! {
    pub struct BauctionData { rows: "BA" => BauctionRow }
}

record! {
    /// Investment coin sale price.
    pub struct CoinRow {
        date: "date",
        catalog_number: "Cat_number",
        name: "name",
        metal: "Metall",
        nominal: "nominal",
        price_buy: "PriceBR",
        price_sell: "PriceSR",
    }
}

listing! {
    pub struct CoinsBaseData { rows: "CB" => CoinRow }
}
