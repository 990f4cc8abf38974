//! Reckon MCP Server
//!
//! Line-based JSON-RPC 2.0 over stdio. Logging goes to stderr via
//! tracing so stdout stays a clean protocol channel.
//!
//! Tools:
//! - calculate: Evaluate an infix expression
//! - evaluate: Evaluate a single-variable function at x
//! - plot: Sample a function over a window
//! - convert / convert_temperature: Unit conversion
//! - format: Display formatting for a number
//! - to_base: Radix conversion for programmer mode
//! - date_diff / date_shift: Calendar arithmetic
//! - help, list_functions, list_constants, list_units
//!
//! Resources:
//! - reckon://units - The unit catalog
//! - reckon://units/{quantity} - Units of one quantity

use reckon::Reckon;
use reckon_core::{format, CivilDate, DateUnit, Radix, Value, WordSize};
use reckon_graph::{sample_plot, PlotRange};
use reckon_plugin::AngleMode;
use reckon_units::{catalog, convert_temperature_str};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "reckon";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }
}

fn history_limit() -> usize {
    env::var("RECKON_HISTORY_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(reckon::DEFAULT_HISTORY_LIMIT)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut engine = Reckon::with_standard_library().with_history_limit(history_limit());

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "reckon-mcp started");
    info!(history_limit = engine.session().history.limit(), "session configured");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        error!("request parse error: {}", e);
                        let response = McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        };
                        write_response(&response);
                        continue;
                    }
                };

                debug!(method = %request.method, "processing request");
                let response = handle_request(&mut engine, &request);

                // Notifications (no id) get no response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification, no response");
                    continue;
                }

                write_response(&response);
            }
            Err(e) => {
                error!("error reading stdin: {}", e);
                break;
            }
        }
    }

    info!("server shutting down");
}

fn write_response(response: &McpResponse) {
    let payload = match serde_json::to_string(response) {
        Ok(s) => s,
        Err(e) => {
            error!("response serialization failed: {}", e);
            return;
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", payload).and_then(|_| stdout.flush()) {
        error!("error writing response: {}", e);
    }
}

fn handle_request(engine: &mut Reckon, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(engine, &request.params),

        // Resources
        "resources/list" => handle_resources_list(),
        "resources/read" => handle_resources_read(&request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Multi-mode calculator engine: expressions, units, graphing, dates, bases"
        },
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false }
        },
        "instructions": "Use 'calculate' for expressions, 'convert' for units, 'plot' for function sampling. 'help' documents every function and constant."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "calculate",
                "description": "Evaluate an infix arithmetic expression (numbers, + - * / ^, parentheses, functions, constants).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "expression": { "type": "string", "description": "Expression to evaluate" },
                        "angle_mode": { "type": "string", "enum": ["radians", "degrees"], "description": "Trig angle mode (default: radians)" }
                    },
                    "required": ["expression"]
                }
            },
            {
                "name": "evaluate",
                "description": "Evaluate a single-variable function at a point (variable x, radian trig).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "function": { "type": "string", "description": "Function of x, e.g. \"sin(x) + x^2\"" },
                        "x": { "type": "number", "description": "Sample point" }
                    },
                    "required": ["function", "x"]
                }
            },
            {
                "name": "plot",
                "description": "Sample a function of x over a window: 101 points, out-of-window and undefined samples dropped.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "function": { "type": "string" },
                        "x_min": { "type": "number" },
                        "x_max": { "type": "number" },
                        "y_min": { "type": "number" },
                        "y_max": { "type": "number" }
                    },
                    "required": ["function", "x_min", "x_max", "y_min", "y_max"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between units of the same quantity (length, volume, weight, energy, area, speed, time, power).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": "number" },
                        "from": { "type": "string", "description": "Source unit, e.g. \"km\"" },
                        "to": { "type": "string", "description": "Target unit, e.g. \"mi\"" }
                    },
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "convert_temperature",
                "description": "Convert between celsius, fahrenheit, and kelvin.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": "number" },
                        "from": { "type": "string", "enum": ["celsius", "fahrenheit", "kelvin"] },
                        "to": { "type": "string", "enum": ["celsius", "fahrenheit", "kelvin"] }
                    },
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "format",
                "description": "Display-format a number (scientific notation outside [1e-10, 1e15), error marker for non-finite).",
                "inputSchema": {
                    "type": "object",
                    "properties": { "value": { "type": "number" } },
                    "required": ["value"]
                }
            },
            {
                "name": "to_base",
                "description": "Convert an integer between bases 2, 8, 10, 16, optionally truncated to a word size.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": "string", "description": "Digits in the source base" },
                        "from_base": { "type": "integer", "enum": [2, 8, 10, 16] },
                        "to_base": { "type": "integer", "enum": [2, 8, 10, 16] },
                        "word_size": { "type": "integer", "enum": [8, 16, 32, 64], "description": "Two's-complement word size (default: 64)" }
                    },
                    "required": ["value", "from_base", "to_base"]
                }
            },
            {
                "name": "date_diff",
                "description": "Difference between two ISO dates in days, weeks, months, or years (absolute, calendar-truncated).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "start": { "type": "string", "description": "YYYY-MM-DD" },
                        "end": { "type": "string", "description": "YYYY-MM-DD" },
                        "unit": { "type": "string", "enum": ["day", "week", "month", "year"] }
                    },
                    "required": ["start", "end", "unit"]
                }
            },
            {
                "name": "date_shift",
                "description": "Add or subtract a signed amount of days/weeks/months/years from an ISO date (month-end clamped).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "date": { "type": "string", "description": "YYYY-MM-DD" },
                        "amount": { "type": "integer", "description": "Signed shift" },
                        "unit": { "type": "string", "enum": ["day", "week", "month", "year"] }
                    },
                    "required": ["date", "amount", "unit"]
                }
            },
            {
                "name": "help",
                "description": "Documentation for a function or constant, or general help.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function or constant name. Omit for general help." }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": ["math", "trig", "units"] }
                    }
                }
            },
            {
                "name": "list_constants",
                "description": "List available constants with sources.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "list_units",
                "description": "List the unit catalog, optionally for one quantity.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "quantity": { "type": "string", "description": "length, volume, weight, energy, area, speed, time, power" }
                    }
                }
            }
        ]
    }))
}

fn handle_resources_list() -> Result<JsonValue, McpError> {
    let mut resources = vec![json!({
        "uri": "reckon://units",
        "name": "units",
        "description": "All conversion tables with factors to each base unit",
        "mimeType": "application/json"
    })];
    for table in catalog::tables() {
        resources.push(json!({
            "uri": format!("reckon://units/{}", table.quantity()),
            "name": table.quantity(),
            "description": format!("{} units (base: {})", table.quantity(), table.base_unit()),
            "mimeType": "application/json"
        }));
    }
    Ok(json!({ "resources": resources }))
}

fn handle_resources_read(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing uri parameter"))?;

    let payload = if uri == "reckon://units" {
        json!(catalog::tables().iter().map(|t| table_json(t)).collect::<Vec<_>>())
    } else if let Some(quantity) = uri.strip_prefix("reckon://units/") {
        let table = catalog::find_table(quantity).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown quantity: {}", quantity))
        })?;
        table_json(table)
    } else {
        return Err(McpError::invalid_params(format!(
            "Invalid URI: {}. Expected reckon://units or reckon://units/{{quantity}}",
            uri
        )));
    };

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": payload.to_string()
        }]
    }))
}

fn table_json(table: &reckon_units::ConversionTable) -> JsonValue {
    json!({
        "quantity": table.quantity(),
        "base_unit": table.base_unit(),
        "units": table.units().iter().map(|u| {
            json!({ "name": u, "factor": table.factor(u) })
        }).collect::<Vec<_>>()
    })
}

fn handle_tool_call(engine: &mut Reckon, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "calculate" => tool_calculate(engine, args),
        "evaluate" => tool_evaluate(engine, args),
        "plot" => tool_plot(engine, args),
        "convert" => tool_convert(args),
        "convert_temperature" => tool_convert_temperature(args),
        "format" => tool_format(args),
        "to_base" => tool_to_base(args),
        "date_diff" => tool_date_diff(args),
        "date_shift" => tool_date_shift(args),
        "help" => tool_help(engine, args),
        "list_functions" => tool_list_functions(engine, args),
        "list_constants" => tool_list_constants(engine),
        "list_units" => tool_list_units(args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

fn num_arg(args: &JsonValue, name: &str) -> Result<f64, McpError> {
    args.get(name)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

fn value_result(value: &Value) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": value.to_string() }],
        "value": value_to_json(value),
        "isError": value.is_error()
    })
}

fn tool_calculate(engine: &mut Reckon, args: JsonValue) -> Result<JsonValue, McpError> {
    let expression = str_arg(&args, "expression")?;
    if let Some(mode) = args.get("angle_mode").and_then(|v| v.as_str()) {
        let mode = AngleMode::parse(mode)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown angle_mode: {}", mode)))?;
        engine.set_angle_mode(mode);
    }
    let result = engine.calculate(expression);
    Ok(value_result(&result))
}

fn tool_evaluate(engine: &Reckon, args: JsonValue) -> Result<JsonValue, McpError> {
    let function = str_arg(&args, "function")?;
    let x = num_arg(&args, "x")?;
    let result = engine.evaluate_at(function, x);
    Ok(value_result(&result))
}

fn tool_plot(engine: &Reckon, args: JsonValue) -> Result<JsonValue, McpError> {
    let function = str_arg(&args, "function")?;
    let range = PlotRange::new(
        num_arg(&args, "x_min")?,
        num_arg(&args, "x_max")?,
        num_arg(&args, "y_min")?,
        num_arg(&args, "y_max")?,
    );
    if range.x_max <= range.x_min {
        return Err(McpError::invalid_params("x_max must be greater than x_min"));
    }
    let points = sample_plot(function, range, engine.registry());
    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} points", points.len()) }],
        "points": points,
        "isError": false
    }))
}

fn tool_convert(args: JsonValue) -> Result<JsonValue, McpError> {
    let value = num_arg(&args, "value")?;
    let from = str_arg(&args, "from")?;
    let to = str_arg(&args, "to")?;

    let (from_table, from_name) = catalog::find_unit(from)
        .ok_or_else(|| McpError::invalid_params(format!("Unknown unit: {}", from)))?;
    let (to_table, to_name) = catalog::find_unit(to)
        .ok_or_else(|| McpError::invalid_params(format!("Unknown unit: {}", to)))?;
    if from_table.quantity() != to_table.quantity() {
        return Err(McpError::invalid_params(format!(
            "Cannot convert {} ({}) to {} ({})",
            from_name,
            from_table.quantity(),
            to_name,
            to_table.quantity()
        )));
    }

    let result = from_table.convert(value, from_name, to_name);
    Ok(json!({
        "content": [{ "type": "text", "text": format::display(result) }],
        "value": result,
        "quantity": from_table.quantity(),
        "from": from_name,
        "to": to_name,
        "isError": false
    }))
}

fn tool_convert_temperature(args: JsonValue) -> Result<JsonValue, McpError> {
    let value = num_arg(&args, "value")?;
    let from = str_arg(&args, "from")?;
    let to = str_arg(&args, "to")?;
    // Fail-soft contract of the string-keyed converter applies
    let result = convert_temperature_str(value, from, to);
    Ok(json!({
        "content": [{ "type": "text", "text": format::display(result) }],
        "value": result,
        "isError": false
    }))
}

fn tool_format(args: JsonValue) -> Result<JsonValue, McpError> {
    let value = num_arg(&args, "value")?;
    let text = format::display(value);
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "isError": text == format::ERROR_MARKER
    }))
}

fn tool_to_base(args: JsonValue) -> Result<JsonValue, McpError> {
    let text = str_arg(&args, "value")?;
    let from = args
        .get("from_base")
        .and_then(|v| v.as_u64())
        .and_then(|v| Radix::try_from_value(v as u32))
        .ok_or_else(|| McpError::invalid_params("from_base must be one of 2, 8, 10, 16"))?;
    let to = args
        .get("to_base")
        .and_then(|v| v.as_u64())
        .and_then(|v| Radix::try_from_value(v as u32))
        .ok_or_else(|| McpError::invalid_params("to_base must be one of 2, 8, 10, 16"))?;
    let word_size = match args.get("word_size") {
        None => WordSize::W64,
        Some(v) => v
            .as_u64()
            .and_then(|b| WordSize::try_from_bits(b as u32))
            .ok_or_else(|| McpError::invalid_params("word_size must be one of 8, 16, 32, 64"))?,
    };

    let parsed = from
        .parse(text)
        .map_err(|e| McpError::invalid_params(e.to_string()))?;
    let truncated = word_size.truncate(parsed);
    Ok(json!({
        "content": [{ "type": "text", "text": to.format(truncated) }],
        "value": truncated,
        "isError": false
    }))
}

fn date_unit_arg(args: &JsonValue) -> Result<DateUnit, McpError> {
    let unit = str_arg(args, "unit")?;
    DateUnit::parse(unit)
        .ok_or_else(|| McpError::invalid_params(format!("Unknown unit: {}", unit)))
}

fn tool_date_diff(args: JsonValue) -> Result<JsonValue, McpError> {
    let start = CivilDate::parse(str_arg(&args, "start")?)
        .map_err(|e| McpError::invalid_params(e.to_string()))?;
    let end = CivilDate::parse(str_arg(&args, "end")?)
        .map_err(|e| McpError::invalid_params(e.to_string()))?;
    let unit = date_unit_arg(&args)?;

    let diff = start.diff(&end, unit);
    Ok(json!({
        "content": [{ "type": "text", "text": format!("{}", diff) }],
        "value": diff,
        "isError": false
    }))
}

fn tool_date_shift(args: JsonValue) -> Result<JsonValue, McpError> {
    let date = CivilDate::parse(str_arg(&args, "date")?)
        .map_err(|e| McpError::invalid_params(e.to_string()))?;
    let amount = args
        .get("amount")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| McpError::invalid_params("Missing amount argument"))?;
    let unit = date_unit_arg(&args)?;

    let shifted = date
        .shift(amount, unit)
        .map_err(|e| McpError::invalid_params(e.to_string()))?;
    Ok(json!({
        "content": [{ "type": "text", "text": shifted.to_string() }],
        "value": shifted.to_string(),
        "isError": false
    }))
}

fn tool_help(engine: &Reckon, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|v| v.as_str());
    let help = engine.help(name);
    Ok(json!({
        "content": [{ "type": "text", "text": format_help(&help) }],
        "data": value_to_json(&help)
    }))
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        _ => format!("{:?}", help),
    }
}

fn tool_list_functions(engine: &Reckon, args: JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());
    let functions = engine.list_functions(category);
    Ok(json!({
        "content": [{ "type": "text", "text": "Functions listed" }],
        "data": value_to_json(&functions)
    }))
}

fn tool_list_constants(engine: &Reckon) -> Result<JsonValue, McpError> {
    let constants = engine.list_constants();
    Ok(json!({
        "content": [{ "type": "text", "text": "Constants listed" }],
        "data": value_to_json(&constants)
    }))
}

fn tool_list_units(args: JsonValue) -> Result<JsonValue, McpError> {
    let payload = match args.get("quantity").and_then(|v| v.as_str()) {
        Some(quantity) => {
            let table = catalog::find_table(quantity).ok_or_else(|| {
                McpError::invalid_params(format!("Unknown quantity: {}", quantity))
            })?;
            table_json(table)
        }
        None => json!(catalog::tables().iter().map(|t| table_json(t)).collect::<Vec<_>>()),
    };
    Ok(json!({
        "content": [{ "type": "text", "text": "Units listed" }],
        "data": payload
    }))
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => {
            // Non-finite numbers have no JSON form; send the display marker
            serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(format::ERROR_MARKER.to_string()))
        }
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Date(d) => JsonValue::String(d.to_string()),
        Value::List(l) => JsonValue::Array(l.iter().map(value_to_json).collect()),
        Value::Object(o) => {
            JsonValue::Object(o.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect())
        }
        Value::Error(e) => json!({"_error": {"code": e.code, "message": e.message}}),
    }
}
