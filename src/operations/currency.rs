//! Exchange-rate responses.

record! {
    /// Official rate of one currency on a date.
    pub struct ValuteCursOnDate {
        name: "Vname",
        nominal: "Vnom",
        rate: "Vcurs",
        code: "Vcode",
        char_code: "VchCode",
        unit_rate: "VunitRate",
    }
}

listing! {
    /// `ValuteData` returned by `GetCursOnDateXML`.
    pub struct CursOnDateData { rates: "ValuteCursOnDate" => ValuteCursOnDate }
}

record! {
    /// One day of a currency's rate history.
    pub struct ValuteCursDynamic {
        date: "CursDate",
        code: "Vcode",
        nominal: "Vnom",
        rate: "Vcurs",
        unit_rate: "VunitRate",
    }
}

listing! {
    /// `ValuteData` returned by `GetCursDynamicXML`.
    pub struct CursDynamicData { rates: "ValuteCursDynamic" => ValuteCursDynamic }
}

record! {
    /// Directory entry for a quoted currency.
    pub struct EnumValute {
        code: "Vcode",
        name: "Vname",
        english_name: "VEngname",
        nominal: "Vnom",
        common_code: "VcommonCode",
        num_code: "VnumCode",
        char_code: "VcharCode",
    }
}

listing! {
    /// `ValuteData` returned by `EnumValutesXML`.
    pub struct EnumValutesData { valutes: "EnumValutes" => EnumValute }
}

record! {
    /// Dual-currency basket value.
    pub struct BiCurBaseRow {
        date: "D0",
        value: "VAL",
    }
}

listing! {
    pub struct BiCurBaseData { rows: "BCB" => BiCurBaseRow }
}

record! {
    /// Current weights of the dual-currency basket.
    pub struct BiCurBacketRow {
        date: "D0",
        usd: "USD",
        eur: "EUR",
    }
}

listing! {
    pub struct BiCurBacketData { rows: "BC" => BiCurBacketRow }
}
