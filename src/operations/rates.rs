//! Interest-rate responses.

record! {
    pub struct KeyRateRow {
        date: "DT",
        rate: "Rate",
    }
}

listing! {
    /// Key rate history.
    pub struct KeyRateData { rows: "KR" => KeyRateRow }
}

record! {
    /// RUONIA fixing.
    pub struct RuoniaRow {
        date: "D0",
        rate: "ruo",
        volume: "vol",
        updated: "DateUpdate",
    }
}

listing! {
    pub struct RuoniaData { rows: "ro" => RuoniaRow }
}

record! {
    /// ROISfix term fixings.
    pub struct RoisFixRow {
        date: "D0",
        week1: "R1W",
        week2: "R2W",
        month1: "R1M",
        month2: "R2M",
        month3: "R3M",
        month6: "R6M",
    }
}

listing! {
    pub struct RoisFixData { rows: "rf" => RoisFixRow }
}

record! {
    /// Interbank lending rates by term.
    pub struct MkrRow {
        date: "CDate",
        kind: "p1",
        day1: "d1",
        day7: "d7",
        day30: "d30",
        day90: "d90",
        day180: "d180",
        day360: "d360",
    }
}

listing! {
    pub struct MkrData { rows: "MKR" => MkrRow }
}

record! {
    pub struct OvernightRow {
        date: "date",
        rate: "stavka",
    }
}

listing! {
    /// Overnight credit rate.
    pub struct OvernightData { rows: "OB" => OvernightRow }
}

record! {
    pub struct DepoRow {
        date: "DateDepo",
        overnight: "Overnight",
    }
}

listing! {
    /// Deposit rates.
    pub struct DepoDynamicData { rows: "Depo" => DepoRow }
}

record! {
    /// Repo fixing.
    pub struct FixingRow {
        date: "D0",
        term: "Term",
        rate: "Rate",
    }
}

listing! {
    pub struct FixingBaseData { rows: "Fixing" => FixingRow }
}
