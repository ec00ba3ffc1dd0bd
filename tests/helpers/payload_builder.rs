// ==========================================
// gviz 响应封包构建器
// ==========================================

use latam_dashboard::importer::ENVELOPE_MARKER;
use serde_json::{json, Value};

/// 构建一行单元格；Value::Null 表示空单元格
fn cells(values: Vec<Value>) -> Value {
    let cells: Vec<Value> = values
        .into_iter()
        .map(|v| if v.is_null() { Value::Null } else { json!({ "v": v }) })
        .collect();
    json!({ "c": cells })
}

pub struct PayloadBuilder {
    status: String,
    rows: Option<Vec<Value>>,
    include_table: bool,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            rows: Some(Vec::new()),
            include_table: true,
        }
    }
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.get_or_insert_with(Vec::new).push(cells(values));
        self
    }

    pub fn raw_row(mut self, row: Value) -> Self {
        self.rows.get_or_insert_with(Vec::new).push(row);
        self
    }

    pub fn without_rows(mut self) -> Self {
        self.rows = None;
        self
    }

    pub fn without_table(mut self) -> Self {
        self.include_table = false;
        self
    }

    pub fn error_status(mut self) -> Self {
        self.status = "error".to_string();
        self.include_table = false;
        self
    }

    pub fn build(self) -> String {
        let mut body = json!({ "version": "0.6", "reqId": "0", "status": self.status });
        if self.status == "error" {
            body["errors"] = json!([{ "reason": "invalid_query", "message": "Invalid query" }]);
        }
        if self.include_table {
            let mut table = json!({ "cols": [] });
            if let Some(rows) = self.rows {
                table["rows"] = Value::Array(rows);
            }
            body["table"] = table;
        }
        format!("/*O_o*/\n{}({});", ENVELOPE_MARKER, body)
    }
}

/// 直接由行构建封包
pub fn gviz_payload(rows: Vec<Vec<Value>>) -> String {
    rows.into_iter()
        .fold(PayloadBuilder::new(), |b, r| b.row(r))
        .build()
}

/// 预留单行（A..I）
#[allow(clippy::too_many_arguments)]
pub fn order_row(
    date: &str,
    order_fy: &str,
    party_name: &str,
    amount: f64,
    reserve: f64,
    total: f64,
    order_no: &str,
    segment: &str,
    req_reserve_12: f64,
) -> Vec<Value> {
    vec![
        json!(date),
        json!(order_fy),
        json!(party_name),
        json!(amount),
        json!(reserve),
        json!(total),
        json!(order_no),
        json!(segment),
        json!(req_reserve_12),
    ]
}

/// 国家毛利行（A..F）
pub fn gp_row(
    country: &str,
    segment: &str,
    code: &str,
    export_value: f64,
    import_value: f64,
    gp: f64,
) -> Vec<Value> {
    vec![
        json!(country),
        json!(segment),
        json!(code),
        json!(export_value),
        json!(import_value),
        json!(gp),
    ]
}
