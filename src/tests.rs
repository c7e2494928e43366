use super::*;

const PRODUCT_FORM_HTML: &str = r#"
<!DOCTYPE html>
<form id="create_product" method="POST" action="/create_product">
  <input type="radio" name="product_category" id="cat_tshirt" value="tshirt"
         onclick="selectSizedStock()">
  <input type="radio" name="product_category" id="cat_hat" value="hat" checked
         onclick="selectGenericStock()">
  <input id="Stock" name="one_size_stock" type="number" value="5">
  <input id="Small Stock" name="small_stock" type="number" style="display: none;">
  <input id="Medium Stock" name="medium_stock" type="number" style="display: none;">
  <input id="Large Stock" name="large_stock" type="number" style="display: none;">
</form>
"#;

#[test]
fn parse_html_indexes_ids_with_spaces_and_decodes_entities() -> Result<()> {
    let dom = parse_html(r#"<p id="Small Stock">&pound;12 &amp; more</p>"#)?;
    let node = dom.by_id("Small Stock").expect("id should be indexed");
    assert_eq!(dom.text_content(node), "£12 & more");
    Ok(())
}

#[test]
fn parse_html_keeps_first_duplicate_id() -> Result<()> {
    let dom = parse_html(r#"<span id="stock">a</span><span id="stock">b</span>"#)?;
    let node = dom.by_id("stock").expect("id should be indexed");
    assert_eq!(dom.text_content(node), "a");
    Ok(())
}

#[test]
fn parse_html_reports_unclosed_comment() {
    let err = parse_html("<p>ok</p><!-- never closed").expect_err("comment is unclosed");
    assert_eq!(err, Error::HtmlParse("unclosed HTML comment".into()));
}

#[test]
fn parse_html_ignores_unmatched_end_tags() -> Result<()> {
    let dom = parse_html(r#"<div id="outer"><span id="inner">x</b></span>y</div>"#)?;
    let outer = dom.by_id("outer").expect("outer should exist");
    assert_eq!(dom.text_content(outer), "xy");
    Ok(())
}

#[test]
fn parse_html_initializes_select_and_textarea_values() -> Result<()> {
    let dom = parse_html(
        r#"
        <select id="order_by">
          <option value="">Sort Products
          <option value="price_lth" selected>Price lowest first
          <option value="price_htl">Price highest first
        </select>
        <textarea id="note">hello <b></textarea>
        "#,
    )?;
    let select = dom.by_id("order_by").expect("select should exist");
    let note = dom.by_id("note").expect("textarea should exist");
    assert_eq!(dom.value(select)?, "price_lth");
    assert_eq!(dom.value(note)?, "hello <b>");
    Ok(())
}

#[test]
fn style_declarations_round_trip_through_style_set() -> Result<()> {
    let mut dom = parse_html(r#"<div id="panel" style="color: red; display:none"></div>"#)?;
    let panel = dom.by_id("panel").expect("panel should exist");
    assert_eq!(dom.style_get(panel, "display")?, "none");

    dom.style_set(panel, "display", "inline")?;
    assert_eq!(
        dom.attr(panel, "style").as_deref(),
        Some("color: red; display: inline;")
    );
    Ok(())
}

#[test]
fn parse_style_declarations_ignores_semicolons_inside_quotes() {
    let decls = parse_style_declarations(Some(r#"font-family: "a;b"; display: none"#));
    assert_eq!(
        decls,
        vec![
            ("font-family".to_string(), r#""a;b""#.to_string()),
            ("display".to_string(), "none".to_string()),
        ]
    );
}

#[test]
fn parse_leading_integer_reads_integer_prefix() -> Result<()> {
    assert_eq!(parse_leading_integer("10")?, 10);
    assert_eq!(parse_leading_integer("  42.99")?, 42);
    assert_eq!(parse_leading_integer("-3 items")?, -3);
    assert_eq!(parse_leading_integer("+7")?, 7);
    assert!(matches!(
        parse_leading_integer("£10"),
        Err(Error::InvalidTotal(_))
    ));
    assert!(matches!(
        parse_leading_integer(""),
        Err(Error::InvalidTotal(_))
    ));
    Ok(())
}

#[test]
fn visibility_reads_none_as_hidden_and_anything_else_as_visible() {
    assert_eq!(Visibility::from_css_value("none"), Visibility::Hidden);
    assert_eq!(Visibility::from_css_value(" NONE "), Visibility::Hidden);
    assert_eq!(Visibility::from_css_value("block"), Visibility::Visible);
    assert_eq!(Visibility::from_css_value(""), Visibility::Visible);
}

#[test]
fn tokens_parse_exactly_and_reject_unknown_values() {
    assert_eq!("medium".parse::<SizeTier>(), Ok(SizeTier::Medium));
    assert_eq!("order".parse::<ReportTab>(), Ok(ReportTab::Order));
    assert_eq!("sized".parse::<StockMode>(), Ok(StockMode::Sized));
    assert_eq!(
        "Small".parse::<SizeTier>(),
        Err(Error::UnknownToken {
            kind: "size",
            token: "Small".into(),
        })
    );
    assert!("users".parse::<ReportTab>().is_err());
    assert_eq!(ShippingTier::from_token("first"), ShippingTier::First);
    assert_eq!(ShippingTier::from_token("second"), ShippingTier::Standard);
    assert_eq!(ShippingTier::from_token(""), ShippingTier::Standard);
}

#[test]
fn handler_parses_calls_with_literals_and_this_value() -> Result<()> {
    assert_eq!(
        "selectSizeTier(this.value)".parse::<Handler>()?,
        Handler::SelectSizeTier(HandlerArg::ThisValue)
    );
    assert_eq!(
        r#"return updateShippingTotal("first", 10);"#.parse::<Handler>()?,
        Handler::UpdateShippingTotal {
            tier: HandlerArg::Literal("first".into()),
            total: Some(HandlerArg::Literal("10".into())),
        }
    );
    assert_eq!(
        "updateShippingTotal('second')".parse::<Handler>()?,
        Handler::UpdateShippingTotal {
            tier: HandlerArg::Literal("second".into()),
            total: None,
        }
    );
    assert_eq!(
        r"submitNamedForm('basket_\'3')".parse::<Handler>()?,
        Handler::SubmitNamedForm(HandlerArg::Literal("basket_'3".into()))
    );
    assert_eq!(" submitSortingForm ( ) ".parse::<Handler>()?, Handler::SubmitSortingForm);
    Ok(())
}

#[test]
fn storefront_function_names_parse_to_the_same_handlers() -> Result<()> {
    assert_eq!("tshirt()".parse::<Handler>()?, Handler::SelectSizedStock);
    assert_eq!("other();".parse::<Handler>()?, Handler::SelectGenericStock);
    assert_eq!(
        "change_stock(this)".parse::<Handler>()?,
        Handler::SelectSizeTier(HandlerArg::This)
    );
    assert_eq!(
        "alterTotal('first', 10)".parse::<Handler>()?,
        Handler::UpdateShippingTotal {
            tier: HandlerArg::Literal("first".into()),
            total: Some(HandlerArg::Literal("10".into())),
        }
    );
    assert_eq!(
        "submitQuantityForm('basket_3')".parse::<Handler>()?,
        Handler::SubmitNamedForm(HandlerArg::Literal("basket_3".into()))
    );
    assert_eq!(
        "reportsForm(this.value)".parse::<Handler>()?,
        Handler::SelectReportTab(HandlerArg::ThisValue)
    );
    for src in ["tshirt(1)", "change_stock()", "reportsForm(this, 'x')", "change_stock(thisx)"] {
        let err = src.parse::<Handler>().expect_err(src);
        assert!(matches!(err, Error::HandlerParse(_)), "{src}: {err:?}");
    }
    Ok(())
}

#[test]
fn handler_rejects_unknown_names_bad_arity_and_bad_arguments() {
    for src in [
        "alert('hi')",
        "selectSizedStock('x')",
        "selectReportTab()",
        "updateShippingTotal('first', '10', '2')",
        "selectSizeTier(size)",
        "selectSizeTier('small',)",
        "not a call",
    ] {
        let err = src.parse::<Handler>().expect_err(src);
        assert!(matches!(err, Error::HandlerParse(_)), "{src}: {err:?}");
    }
}

#[test]
fn handler_arg_resolves_this_value() {
    assert_eq!(HandlerArg::ThisValue.resolve("large"), "large");
    assert_eq!(HandlerArg::This.resolve("medium"), "medium");
    assert_eq!(HandlerArg::Literal("small".into()).resolve("large"), "small");
}

#[test]
fn config_validation_rejects_empty_and_repeated_ids() {
    assert_eq!(ControllerConfig::default().validate(), Ok(()));

    let mut config = ControllerConfig::default();
    config.ids.medium_tier = config.ids.small_tier.clone();
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    let mut config = ControllerConfig::default();
    config.ids.total_cost.clear();
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    // Groups live on different pages, so they may share an id.
    let mut config = ControllerConfig::default();
    config.ids.stock_panel = config.ids.generic_stock.clone();
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn page_rejects_invalid_config() {
    let mut config = ControllerConfig::default();
    config.ids.users_panel = "orders".into();
    let err = Page::from_html_with_config("<div></div>", config).expect_err("repeated id");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn trace_log_records_operations_and_respects_limit() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_FORM_HTML)?;
    page.set_trace_stderr(false);
    page.enable_trace(true);
    page.controller().clone().select_sized_stock(&mut page)?;

    let logs = page.take_trace_logs();
    assert!(logs.contains(&"[display] #Stock none".to_string()), "{logs:?}");
    assert!(logs.contains(&"[value] #Small Stock \"\"".to_string()), "{logs:?}");
    assert!(page.take_trace_logs().is_empty());

    page.set_trace_log_limit(2)?;
    page.controller().clone().select_generic_stock(&mut page)?;
    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1], "[value] #Large Stock \"0\"");

    assert!(matches!(page.set_trace_log_limit(0), Err(Error::Config(_))));
    Ok(())
}

#[test]
fn trace_is_silent_until_enabled() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_FORM_HTML)?;
    page.controller().clone().select_sized_stock(&mut page)?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn stock_mode_switch_resets_values() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_FORM_HTML)?;
    let controller = page.controller().clone();

    controller.select_sized_stock(&mut page)?;
    page.assert_hidden("Stock")?;
    page.assert_value("Stock", "0")?;
    for id in ["Small Stock", "Medium Stock", "Large Stock"] {
        page.assert_visible(id)?;
        page.assert_value(id, "")?;
    }

    page.set_value("Medium Stock", "12")?;
    controller.select_generic_stock(&mut page)?;
    page.assert_visible("Stock")?;
    page.assert_value("Stock", "")?;
    for id in ["Small Stock", "Medium Stock", "Large Stock"] {
        page.assert_hidden(id)?;
        page.assert_value(id, "0")?;
    }
    Ok(())
}

#[test]
fn missing_stock_input_leaves_page_untouched() -> Result<()> {
    let html = r#"
    <input id="Stock" value="5">
    <input id="Small Stock">
    <input id="Medium Stock">
    "#;
    let mut page = Page::from_html(html)?;
    let err = page
        .controller()
        .clone()
        .select_sized_stock(&mut page)
        .expect_err("large stock input is missing");
    assert_eq!(err, Error::ElementNotFound("Large Stock".into()));
    page.assert_visible("Stock")?;
    page.assert_value("Stock", "5")?;
    Ok(())
}

#[test]
fn radio_click_runs_bound_handler_and_unchecks_group() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_FORM_HTML)?;
    page.click("cat_tshirt")?;
    assert!(page.checked("cat_tshirt")?);
    assert!(!page.checked("cat_hat")?);
    page.assert_hidden("Stock")?;
    page.assert_visible("Large Stock")?;

    // Clicking an already checked radio still fires onclick.
    page.set_value("Small Stock", "3")?;
    page.click("cat_tshirt")?;
    page.assert_value("Small Stock", "")?;
    Ok(())
}

#[test]
fn disabled_controls_ignore_clicks() -> Result<()> {
    let html = r#"
    <button id="go" disabled onclick="selectReportTab('order')">go</button>
    <div id="users"></div><div id="orders" style="display:none"></div><div id="stock"></div>
    "#;
    let mut page = Page::from_html(html)?;
    page.click("go")?;
    page.assert_hidden("orders")?;
    Ok(())
}

#[test]
fn malformed_inline_handler_surfaces_parse_error() -> Result<()> {
    let mut page = Page::from_html(r#"<button id="b" onclick="doSomething()">x</button>"#)?;
    let err = page.click("b").expect_err("unknown handler");
    assert!(matches!(err, Error::HandlerParse(_)));
    Ok(())
}

#[test]
fn set_text_replaces_children_and_drops_their_ids() -> Result<()> {
    let mut page = Page::from_html(r#"<p id="total_cost"><b id="inner">£10</b></p>"#)?;
    page.set_text("total_cost", "£12")?;
    page.assert_text("total_cost", "£12")?;
    assert!(!page.exists("inner"));
    Ok(())
}

#[test]
fn repeated_label_updates_reuse_the_text_node() -> Result<()> {
    let mut page = Page::from_html(r#"<span id="total_cost">£10</span>"#)?;
    let before = page.dom.nodes.len();
    for total in 11..40 {
        page.set_text("total_cost", &format!("£{total}"))?;
    }
    page.assert_text("total_cost", "£39")?;
    assert_eq!(page.dom.nodes.len(), before);

    page.set_text("total_cost", "")?;
    page.assert_text("total_cost", "")?;
    page.set_text("total_cost", "£1")?;
    page.assert_text("total_cost", "£1")?;
    Ok(())
}

#[test]
fn assertion_failure_carries_dom_snippet() -> Result<()> {
    let page = Page::from_html(r#"<span id="delivery_cost">£1</span>"#)?;
    let err = page
        .assert_text("delivery_cost", "£2")
        .expect_err("text differs");
    match err {
        Error::AssertionFailed {
            id,
            expected,
            actual,
            dom_snippet,
        } => {
            assert_eq!(id, "delivery_cost");
            assert_eq!(expected, "£2");
            assert_eq!(actual, "£1");
            assert_eq!(dom_snippet, r#"<span id="delivery_cost">£1</span>"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn submit_collects_successful_controls_in_document_order() -> Result<()> {
    let html = r#"
    <form id="shipping_form" action="/change_shipping" method="post">
      <input type="radio" name="shipping" value="1" checked>
      <input type="radio" name="shipping" value="2">
      <input type="checkbox" name="gift">
      <input type="checkbox" name="insured" checked>
      <input name="note" value="leave at door">
      <input name="skipped" value="x" disabled>
      <input type="submit" name="go" value="Go">
      <select name="speed"><option value="slow">Slow</option></select>
    </form>
    "#;
    let mut page = Page::from_html(html)?;
    let submission = page.submit("shipping_form")?;
    assert_eq!(submission.form_id.as_deref(), Some("shipping_form"));
    assert_eq!(submission.method, "post");
    assert_eq!(submission.action, "/change_shipping");
    assert_eq!(
        submission.entries,
        vec![
            ("shipping".to_string(), "1".to_string()),
            ("insured".to_string(), "on".to_string()),
            ("note".to_string(), "leave at door".to_string()),
            ("speed".to_string(), "slow".to_string()),
        ]
    );
    assert_eq!(submission.value("note"), Some("leave at door"));
    assert_eq!(page.submissions().len(), 1);
    Ok(())
}

#[test]
fn submitting_a_non_form_is_a_type_mismatch() -> Result<()> {
    let mut page = Page::from_html(r#"<div id="shipping_form"></div>"#)?;
    let err = page
        .controller()
        .clone()
        .submit_shipping_form(&mut page)
        .expect_err("not a form");
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert!(page.submissions().is_empty());
    Ok(())
}

#[test]
fn submit_button_click_submits_owner_form() -> Result<()> {
    let html = r#"
    <form id="q" action="/edit_quantity/3" method="post">
      <input name="quantity" value="2">
      <button id="save">Save</button>
      <button id="noop" type="button">Cancel</button>
    </form>
    "#;
    let mut page = Page::from_html(html)?;
    page.click("noop")?;
    assert!(page.submissions().is_empty());
    page.click("save")?;
    let submissions = page.take_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].value("quantity"), Some("2"));
    assert!(page.submissions().is_empty());
    Ok(())
}
