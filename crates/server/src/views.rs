//! HTML rendering. Pages are assembled as strings — small enough a
//! template engine would be more machinery than markup.

use finance_tracker_core::models::dashboard::Dashboard;
use finance_tracker_core::models::position::Valuation;
use finance_tracker_core::services::chart_service::{
    self, ALLOCATION_CHART_FILE, STOCK_CHART_FILE,
};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;max-width:60em}\
table{border-collapse:collapse;margin:1em 0}\
th,td{border:1px solid #ccc;padding:0.3em 0.8em;text-align:right}\
th:first-child,td:first-child{text-align:left}\
ul.legend{list-style:none;padding:0}\
ul.legend li{margin:0.2em 0}\
nav a{margin-right:1em}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body>{body}</body></html>"
    )
}

// ── Dashboard ───────────────────────────────────────────────────────

pub fn dashboard_page(
    dashboard: &Dashboard,
    show_stock_chart: bool,
    show_allocation_chart: bool,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Asset Overview</h1>");
    body.push_str(
        "<nav><a href=\"/\">Dashboard</a><a href=\"/cash\">Add cash</a>\
         <a href=\"/stock\">Add stock</a></nav>",
    );

    body.push_str(&format!(
        "<p>NTD cash: <b>{:.2}</b> | USD cash: <b>{:.2}</b> | \
         USD&rarr;TWD rate: <b>{}</b> | Total assets (TWD): <b>{}</b></p>",
        dashboard.twd_total, dashboard.usd_total, dashboard.exchange_rate, dashboard.grand_total
    ));

    body.push_str(&cash_table(dashboard));
    body.push_str(&position_table(dashboard));

    if show_stock_chart {
        body.push_str("<h2>Stock value share</h2>");
        body.push_str(&format!(
            "<img src=\"/static/{STOCK_CHART_FILE}\" alt=\"Stock value share\" width=\"480\">"
        ));
        body.push_str(&legend(&chart_service::stock_slices(&dashboard.positions)));
    }

    if show_allocation_chart {
        body.push_str("<h2>Cash / stock allocation</h2>");
        body.push_str(&format!(
            "<img src=\"/static/{ALLOCATION_CHART_FILE}\" \
             alt=\"Cash and stock allocation\" width=\"480\">"
        ));
        body.push_str(&legend(&chart_service::allocation_slices(
            dashboard.usd_total * dashboard.exchange_rate,
            dashboard.twd_total,
            dashboard.total_market_value,
        )));
    }

    layout("Finance Tracker", &body)
}

fn cash_table(dashboard: &Dashboard) -> String {
    if dashboard.cash_entries.is_empty() {
        return "<h2>Cash</h2><p>No cash entries yet.</p>".to_string();
    }

    let mut html = String::from(
        "<h2>Cash</h2><table>\
         <tr><th>Id</th><th>NTD</th><th>USD</th><th>Note</th><th>Date</th><th></th></tr>",
    );
    for entry in &dashboard.cash_entries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td><td>{}</td>\
             <td><form method=\"post\" action=\"/cash_delete\">\
             <input type=\"hidden\" name=\"id\" value=\"{}\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            entry.id,
            entry.twd_amount,
            entry.usd_amount,
            escape(&entry.note),
            entry.date,
            entry.id,
        ));
    }
    html.push_str("</table>");
    html
}

fn position_table(dashboard: &Dashboard) -> String {
    if dashboard.positions.is_empty() {
        return "<h2>Stock</h2><p>No stock transactions yet.</p>".to_string();
    }

    let mut html = String::from(
        "<h2>Stock</h2><table>\
         <tr><th>Ticker</th><th>Shares</th><th>Price</th><th>Cost basis</th>\
         <th>Market value</th><th>Avg cost</th><th>Return %</th><th>Value share %</th></tr>",
    );
    for position in &dashboard.positions {
        match &position.valuation {
            Valuation::Open(v) => html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td>\
                 <td>{:.0}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape(&position.ticker),
                position.shares,
                v.current_price,
                position.cost_basis,
                v.market_value,
                v.average_cost,
                v.return_pct,
                v.value_share_pct,
            )),
            Valuation::Closed => html.push_str(&format!(
                "<tr><td>{}</td><td>0</td><td colspan=\"6\">closed position</td></tr>",
                escape(&position.ticker),
            )),
        }
    }
    html.push_str(&format!(
        "</table><p>Total stock market value: <b>{:.0}</b></p>",
        dashboard.total_market_value
    ));
    html
}

fn legend(slices: &[(String, f64)]) -> String {
    let mut html = String::from("<ul class=\"legend\">");
    for (index, (label, value)) in slices.iter().enumerate() {
        let (r, g, b) = chart_service::slice_color(index);
        html.push_str(&format!(
            "<li><span style=\"display:inline-block;width:12px;height:12px;\
             background:rgb({r},{g},{b})\"></span> {}: {:.0}</li>",
            escape(label),
            value,
        ));
    }
    html.push_str("</ul>");
    html
}

// ── Entry forms ─────────────────────────────────────────────────────

pub fn cash_form_page() -> String {
    layout(
        "Add cash",
        "<h1>Add cash</h1>\
         <form method=\"post\" action=\"/cash\">\
         <p><label>NTD amount <input name=\"taiwanese-dollars\"></label></p>\
         <p><label>USD amount <input name=\"us-dollars\"></label></p>\
         <p><label>Note <input name=\"note\" required></label></p>\
         <p><label>Date <input name=\"date\" type=\"date\" required></label></p>\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Back</a></p>\
         </form>",
    )
}

pub fn stock_form_page() -> String {
    layout(
        "Add stock",
        "<h1>Add stock transaction</h1>\
         <form method=\"post\" action=\"/stock\">\
         <p><label>Ticker <input name=\"stock-id\" required></label></p>\
         <p><label>Shares (negative to sell) <input name=\"stock-num\" required></label></p>\
         <p><label>Unit price <input name=\"stock-price\" required></label></p>\
         <p><label>Processing fee <input name=\"processing-fee\"></label></p>\
         <p><label>Tax <input name=\"tax\"></label></p>\
         <p><label>Date <input name=\"date\" type=\"date\" required></label></p>\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Back</a></p>\
         </form>",
    )
}

// ── Error pages ─────────────────────────────────────────────────────

pub fn validation_error_page(message: &str) -> String {
    layout(
        "Invalid input",
        &format!(
            "<h1>Invalid input</h1><p>{}</p><p><a href=\"/\">Back to dashboard</a></p>",
            escape(message)
        ),
    )
}

pub fn server_error_page() -> String {
    layout(
        "Error",
        "<h1>Something went wrong</h1>\
         <p>The request could not be completed. <a href=\"/\">Back to dashboard</a></p>",
    )
}

/// Minimal HTML escaping for user-entered text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
