#![forbid(unsafe_code)]

mod support;

use serde_json::json;
use support::*;

#[test]
fn initialize_then_ping() {
    let mut server = Server::start("initialize_then_ping");
    let init = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {}
    }));
    let result = init.get("result").expect("initialize result");
    assert_eq!(result["serverInfo"]["name"], json!("tidemark-console"));
    assert!(
        result["serverInfo"]["version"]
            .as_str()
            .is_some_and(|v| v.contains(env!("CARGO_PKG_VERSION")))
    );
    let methods = result["capabilities"]["methods"]
        .as_array()
        .expect("capabilities.methods");
    assert!(methods.iter().any(|m| m == "facets/set"));

    let ping = server.call("ping", json!({}));
    assert_eq!(ping["result"], json!({}));
}

#[test]
fn requests_before_initialize_are_rejected() {
    let mut server = Server::start("requests_before_initialize");
    let resp = server.call("view/get", json!({}));
    assert_json_rpc_error(&resp, -32002);
}

#[test]
fn default_view_is_an_idle_free_text_prompt() {
    let mut server = Server::start_initialized("default_view");
    let view = server.result("view/get", json!({}));
    assert_eq!(view_kind(&view), "free-text-prompt");
    assert_eq!(view_state(&view), "idle");
    assert_eq!(view["changed"], json!(false));
    assert_eq!(view["facets"]["mode"], json!("search"));
    assert_eq!(view["facets"]["data_source"], json!("platform"));
}

#[test]
fn free_text_search_narrows_by_location() {
    let mut server = Server::start_initialized("free_text_search");
    let hits = server.set("free_text_query", json!("fish"));
    assert_eq!(view_kind(&hits), "free-text-prompt");
    assert_eq!(view_state(&hits), "ready");
    assert_eq!(hits["changed"], json!(true));

    let narrowed = server.set("location", json!("bay-of-bengal"));
    let records = narrowed["view"]["records"].as_array().expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], json!("Hilsa Fish"));

    let none = server.set("free_text_query", json!("tuna"));
    assert_eq!(view_state(&none), "no_matches");
}

#[test]
fn otolith_image_flow_gates_on_upload() {
    let mut server = Server::start_initialized("otolith_image_flow");
    server.result("facets/set_top_level", json!({ "type": "otolith" }));
    let prompt = server.set("otolith_type", json!("image"));
    assert_eq!(view_kind(&prompt), "upload-gate");
    assert_eq!(prompt["view"]["variant"]["detail"], json!("otolith-image"));
    assert_eq!(prompt["view"]["state"]["missing"], json!(["otolith-image"]));

    let table = server.set("otolith-image", json!(true));
    assert_eq!(view_kind(&table), "result-table");
    assert_eq!(view_state(&table), "ready");
    assert_eq!(table["view"]["records"].as_array().map(Vec::len), Some(3));
    assert!(table["view"]["derived"]["bands"].is_array());
}

#[test]
fn classification_browser_waits_for_a_rank() {
    let mut server = Server::start_initialized("classification_browser");
    server.result("facets/set_top_level", json!({ "type": "taxonomy" }));
    let waiting = server.set("taxonomy_type", json!("by-classification"));
    assert_eq!(view_kind(&waiting), "classification-browser");
    assert_eq!(
        waiting["view"]["state"]["missing"],
        json!(["class", "order", "family"])
    );

    let browsed = server.set("family", json!("scombridae"));
    assert_eq!(view_state(&browsed), "ready");
    let stats = &browsed["view"]["derived"]["statistics"];
    assert_eq!(stats["total_records"], json!(60));
    assert_eq!(stats["species_found"], json!(2));
}

#[test]
fn parameter_comparison_prompts_until_both_parameters_are_set() {
    let mut server = Server::start_initialized("parameter_comparison");
    server.result("facets/set_mode", json!({ "mode": "visualization" }));
    server.result("facets/set_top_level", json!({ "type": "ecology" }));
    let prompt = server.set("ecology_type", json!("parameter-comparison"));
    assert_eq!(view_kind(&prompt), "parameter-prompt");
    assert_eq!(
        prompt["view"]["state"]["missing"],
        json!(["parameter1", "parameter2"])
    );

    server.set("parameter1", json!("temperature"));
    let chart = server.set("parameter2", json!("salinity"));
    assert_eq!(view_kind(&chart), "parameter-correlation");
    assert_eq!(chart["view"]["records"].as_array().map(Vec::len), Some(3));
    let r = chart["view"]["derived"]["correlation"]
        .as_f64()
        .expect("correlation");
    assert!(r > 0.9, "temperature and salinity rise together (r={r})");
}

#[test]
fn survival_simulator_reports_the_default_score() {
    let mut server = Server::start_initialized("survival_simulator");
    server.result("facets/set_mode", json!({ "mode": "visualization" }));
    server.result("facets/set_top_level", json!({ "type": "simulation" }));
    let view = server.set("simulation_type", json!("predictive"));
    assert_eq!(view_kind(&view), "survival-simulator");
    assert_eq!(view["view"]["derived"]["survival"]["display"], json!("93.4"));

    let warmer = server.set("temperature", json!(25));
    assert_ne!(
        warmer["view"]["derived"]["survival"]["display"],
        json!("93.4")
    );
}

#[test]
fn identical_state_gives_identical_fingerprints() {
    let mut server = Server::start_initialized("fingerprints");
    server.result("facets/set_mode", json!({ "mode": "visualization" }));
    let first = server.result("facets/set_top_level", json!({ "type": "species" }));
    let again = server.result("view/get", json!({}));
    assert_eq!(first["fingerprint"], again["fingerprint"]);
    assert_eq!(first["view"], again["view"]);

    let changed = server.set("location", json!("kerala-coast"));
    assert_ne!(first["fingerprint"], changed["fingerprint"]);
}

#[test]
fn mode_switch_clears_facets_but_keeps_data_source() {
    let mut server = Server::start_initialized("mode_switch");
    server.set("data_source", json!("select"));
    server.set("location", json!("arabian-sea"));
    let switched = server.result("facets/set_mode", json!({ "mode": "visualization" }));
    assert_eq!(switched["changed"], json!(true));
    assert_eq!(switched["facets"]["data_source"], json!("select"));
    assert_eq!(switched["facets"]["location"], json!(null));

    let reset = server.result("facets/reset", json!({}));
    assert_eq!(reset["facets"]["mode"], json!("search"));
    assert_eq!(reset["facets"]["data_source"], json!("platform"));
}

#[test]
fn inactive_family_selection_is_a_no_op() {
    let mut server = Server::start_initialized("inactive_family");
    let resp = server.result("facets/set_top_level", json!({ "type": "simulation" }));
    assert_eq!(resp["changed"], json!(false));
    assert_eq!(view_kind(&resp), "free-text-prompt");

    let slider = server.set("temperature", json!(30));
    assert_eq!(slider["changed"], json!(false));
}

#[test]
fn configured_data_source_applies_at_start_and_reset() {
    let mut server =
        Server::start_initialized_with_args("configured_source", &["--data-source", "uploaded"]);
    let view = server.result("view/get", json!({}));
    assert_eq!(view["facets"]["data_source"], json!("uploaded"));
    server.set("data_source", json!("platform"));
    let reset = server.result("facets/reset", json!({}));
    assert_eq!(reset["facets"]["data_source"], json!("uploaded"));
}

#[test]
fn bad_params_are_invalid_params() {
    let mut server = Server::start_initialized("bad_params");
    assert_json_rpc_error(
        &server.call("facets/set", json!({ "facet": "location", "value": "atlantis" })),
        -32602,
    );
    assert_json_rpc_error(
        &server.call("facets/set", json!({ "facet": "depth_band", "value": 3 })),
        -32602,
    );
    assert_json_rpc_error(&server.call("facets/set_mode", json!({ "mode": "3d" })), -32602);
    assert_json_rpc_error(&server.call("facets/set_top_level", json!({})), -32602);
    assert_json_rpc_error(&server.call("facets/set", json!("location")), -32602);
}

#[test]
fn unknown_method_and_malformed_input() {
    let mut server = Server::start_initialized("unknown_method");
    assert_json_rpc_error(&server.call("view/render", json!({})), -32601);

    server.send_raw("{not json");
    assert_json_rpc_error(&server.recv(), -32700);

    server.send_raw("[1, 2, 3]");
    assert_json_rpc_error(&server.recv(), -32600);

    // The session survives malformed input.
    assert_eq!(server.call("ping", json!({}))["result"], json!({}));
}

#[test]
fn upload_wizard_walks_three_steps() {
    let mut server = Server::start_initialized("upload_wizard");
    let start = server.result("upload/get", json!({}));
    assert_eq!(start["step"], json!("upload"));

    let rejected = server.call(
        "upload/attach",
        json!({ "files": [{ "name": "notes.docx", "size_bytes": 10 }] }),
    );
    assert_json_rpc_error(&rejected, -32000);

    let attached = server.result(
        "upload/attach",
        json!({ "files": [
            { "name": "survey.csv", "size_bytes": 2048 },
            { "name": "stations.json", "size_bytes": 4096 }
        ] }),
    );
    assert_eq!(attached["step"], json!("metadata"));
    assert_eq!(attached["files"][0]["kind"], json!("structured"));
    assert_eq!(attached["files"][1]["kind"], json!("semi-structured"));

    let short = server.call(
        "upload/metadata",
        json!({ "metadata": [{ "title": "Survey" }] }),
    );
    assert_json_rpc_error(&short, -32000);

    let entry = json!({
        "title": "Survey",
        "authors": ["R. Iyer"],
        "collection_date": "2024-03-01"
    });
    let done = server.result(
        "upload/metadata",
        json!({ "metadata": [entry.clone(), entry] }),
    );
    assert_eq!(done["step"], json!("status"));

    let back = server.result("upload/back", json!({}));
    assert_eq!(back["step"], json!("metadata"));
}

#[test]
fn session_record_is_written_to_the_state_dir() {
    let mut server = Server::start_initialized("session_record");
    server.call("ping", json!({}));
    let path = server.state_dir().join("tidemark_last_session.txt");
    let text = std::fs::read_to_string(&path).expect("session record");
    assert!(text.contains("framing=newline_json"));
    assert!(text.contains("last_method=ping"));
    assert!(text.contains("build="));
}
