//! Banking-sector liquidity and reserves responses.

record! {
    /// Correspondent account balances.
    pub struct OstatRow {
        date: "DateOst",
        in_russia: "InRuss",
        in_moscow: "InMoscow",
    }
}

listing! {
    pub struct OstatDynamicData { rows: "Ostat" => OstatRow }
}

record! {
    /// Deposits with the regulator by term.
    pub struct OstatDepoRow {
        date: "D0",
        day1_7: "D1_7",
        day8_30: "D8_30",
        total: "total",
    }
}

listing! {
    pub struct OstatDepoData { rows: "odr" => OstatDepoRow }
}

record! {
    /// International reserves, monthly.
    pub struct MrrfRow {
        date: "D0",
        total: "p1",
        currency: "p2",
        sdr: "p3",
        imf_position: "p4",
        other: "p5",
        gold: "p6",
    }
}

listing! {
    pub struct MrrfData { rows: "mr" => MrrfRow }
}

record! {
    /// International reserves, weekly.
    pub struct Mrrf7dRow {
        date: "D0",
        value: "val",
    }
}

listing! {
    pub struct Mrrf7dData { rows: "mr" => Mrrf7dRow }
}

record! {
    /// Liquidity balance.
    pub struct SaldoRow {
        date: "Dt",
        balance: "DEADLINEBS",
    }
}

listing! {
    pub struct SaldoData { rows: "So" => SaldoRow }
}

record! {
    /// Refinancing instruments outstanding.
    pub struct DvRow {
        date: "Date",
        overnight: "VOvern",
        lombard: "VLomb",
        intraday: "VIDay",
        other: "VOther",
        gold: "Vol_Gold",
        intraday_date: "VIDate",
    }
}

listing! {
    pub struct DvData { rows: "DV" => DvRow }
}
