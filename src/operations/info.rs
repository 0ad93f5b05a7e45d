//! News and headline indicator responses.

use serde::{Deserialize, Serialize};

use crate::operations::{clean_text, Sanitize};

record! {
    pub struct NewsRow {
        id: "Doc_id",
        date: "DocDate",
        title: "Title",
        url: "Url",
    }
}

listing! {
    /// Press releases in a date range.
    pub struct NewsInfoData { items: "News" => NewsRow }
}

/// A headline figure carried as attributes plus element text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(rename(serialize = "Title", deserialize = "@Title"), default)]
    pub title: String,
    #[serde(rename(serialize = "Date", deserialize = "@Date"), default)]
    pub date: String,
    #[serde(rename(serialize = "Value", deserialize = "$text"), default)]
    pub value: String,
}

impl Sanitize for Indicator {
    fn sanitize(&mut self) {
        clean_text(&mut self.title);
        clean_text(&mut self.date);
        clean_text(&mut self.value);
    }
}

/// `RegData` snapshot returned by `MainInfoXML`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainInfoData {
    #[serde(rename = "keyRate", default)]
    pub key_rate: Indicator,
    #[serde(rename = "Inflation", default)]
    pub inflation: Indicator,
    #[serde(rename = "stavka_ref", default)]
    pub refinancing_rate: Indicator,
    #[serde(rename = "GoldBaks", default)]
    pub reserves: Indicator,
}

impl Sanitize for MainInfoData {
    fn sanitize(&mut self) {
        self.key_rate.sanitize();
        self.inflation.sanitize();
        self.refinancing_rate.sanitize();
        self.reserves.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::reader::decode_node;

    const MAIN_INFO: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><MainInfoXMLResponse xmlns="http://web.cbr.ru/"><MainInfoXMLResult><RegData xmlns=""><keyRate Title="Key rate" Date="22.06.2023"> 7.50 </keyRate><Inflation Title="Inflation" Date="01.05.2023">2.51</Inflation><stavka_ref Title="Refinancing rate" Date="22.06.2023">7.50</stavka_ref><GoldBaks Title="Reserves" Date="16.06.2023">587.5</GoldBaks></RegData></MainInfoXMLResult></MainInfoXMLResponse></soap:Body></soap:Envelope>"#;

    #[test]
    fn test_main_info_reads_attributes_and_text() {
        let mut data: MainInfoData = decode_node(MAIN_INFO.as_bytes(), "RegData").unwrap();
        data.sanitize();

        assert_eq!(data.key_rate.title, "Key rate");
        assert_eq!(data.key_rate.date, "22.06.2023");
        assert_eq!(data.key_rate.value, "7.50");
        assert_eq!(data.reserves.value, "587.5");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["keyRate"]["Title"], "Key rate");
        assert_eq!(json["Inflation"]["Value"], "2.51");
    }
}
