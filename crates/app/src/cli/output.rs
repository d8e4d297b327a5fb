//! Table rendering for command output.

use confeitaria::{
    cart::Cart,
    money::format_brl,
    products::{AdminProduct, DashboardStats, Product},
    users::User,
    validation::FieldErrors,
};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

pub(crate) fn product_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Price", "Status"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.formatted_price.clone(),
            product.availability_status.clone(),
        ]);
    }

    render(builder, &[2])
}

pub(crate) fn admin_product_table(products: &[AdminProduct]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Price", "Available", "Updated"]);

    for AdminProduct {
        product,
        updated_at,
        ..
    } in products
    {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.formatted_price.clone(),
            if product.available { "yes" } else { "no" }.to_string(),
            updated_at.strftime(DATE_FORMAT).to_string(),
        ]);
    }

    render(builder, &[2])
}

pub(crate) fn cart_table(cart: &Cart) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "ID", "Product", "Qty", "Unit", "Subtotal"]);

    for (index, line) in cart.lines().iter().enumerate() {
        let product = line.product();

        builder.push_record([
            (index + 1).to_string(),
            product.id.to_string(),
            product.name.clone(),
            line.quantity().to_string(),
            product.formatted_price.clone(),
            format_brl(line.subtotal()),
        ]);
    }

    builder.push_record([
        String::new(),
        String::new(),
        "Total".to_string(),
        cart.item_count().to_string(),
        String::new(),
        cart.formatted_total().to_string(),
    ]);

    render(builder, &[3, 4, 5])
}

pub(crate) fn stats_table(stats: &DashboardStats) -> String {
    let price = |value: Option<Decimal>| value.map_or_else(|| "-".to_string(), format_brl);

    let mut builder = Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Products".to_string(), stats.total_products.to_string()]);
    builder.push_record([
        "Available".to_string(),
        stats.available_products.to_string(),
    ]);
    builder.push_record([
        "Unavailable".to_string(),
        stats.unavailable_products.to_string(),
    ]);
    builder.push_record([
        "Available %".to_string(),
        format!("{:.1}%", stats.available_percentage),
    ]);
    builder.push_record(["Cheapest".to_string(), price(stats.min_price)]);
    builder.push_record(["Most expensive".to_string(), price(stats.max_price)]);
    builder.push_record(["Average price".to_string(), price(stats.average_price)]);

    render(builder, &[1])
}

pub(crate) fn user_summary(user: &User) -> String {
    format!(
        "{} <{}> ({:?}, username {})",
        user.display_name(),
        user.email,
        user.role,
        user.username
    )
}

pub(crate) fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(builder: Builder, right_aligned: &[usize]) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    for &column in right_aligned {
        table.modify(Columns::new(column..column + 1), Alignment::right());
    }

    table.modify(Rows::first(), Alignment::center());

    table.to_string()
}
