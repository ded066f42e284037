//! Notification message rendering
//!
//! Plain-text email and message bodies for order/enquiry events. Each job
//! expands into the concrete deliveries it implies; recipients without a
//! reachable address (no customer email, no configured admin contact) are
//! simply not rendered.

use crate::core::config::NotifyConfig;
use crate::notifications::types::{Delivery, EmailMessage, NotificationJob, TextMessage};
use shared::models::{DeliveryOption, Enquiry, Order, OrderStatus};

/// Expand a job into the deliveries it implies
pub fn deliveries_for(job: &NotificationJob, cfg: &NotifyConfig) -> Vec<Delivery> {
    match job {
        NotificationJob::OrderPlaced { order } => order_placed(order, cfg),
        NotificationJob::OrderStatusChanged { order } => order_status_changed(order, cfg),
        NotificationJob::EnquiryReceived { enquiry } => enquiry_received(enquiry, cfg),
        NotificationJob::EnquiryStatusChanged { enquiry } => enquiry_status_changed(enquiry, cfg),
    }
}

fn order_placed(order: &Order, cfg: &NotifyConfig) -> Vec<Delivery> {
    let mut deliveries = Vec::new();
    let summary = order_summary(order, cfg);

    deliveries.push(Delivery::Email(EmailMessage {
        to: order.customer_info.email.clone(),
        subject: format!("Order Confirmation - #{}", order.short_reference()),
        body: format!(
            "Dear {},\n\nThank you for your order! We're excited to prepare your treats.\n\n{}\n\n{}\n\nPayment: cash on delivery.\n\n{}",
            order.customer_info.name,
            summary,
            fulfillment_block(order, cfg),
            cfg.brand_name
        ),
    }));

    deliveries.push(Delivery::Message(TextMessage {
        to: format_msisdn(&order.customer_info.phone, &cfg.default_country_code),
        body: format!(
            "{}\nOrder #{} received!\n{}\nTotal: {}\nWe'll keep you posted.",
            cfg.brand_name,
            order.short_reference(),
            items_lines(order, cfg),
            money(order.total, cfg)
        ),
    }));

    if let Some(admin_email) = &cfg.admin_email {
        deliveries.push(Delivery::Email(EmailMessage {
            to: admin_email.clone(),
            subject: format!("New order #{}", order.short_reference()),
            body: format!(
                "New order from {} ({}, {}).\n\n{}\n\nDelivery option: {}",
                order.customer_info.name,
                order.customer_info.email,
                order.customer_info.phone,
                summary,
                delivery_option_label(order.delivery_option)
            ),
        }));
    }

    if let Some(admin_phone) = &cfg.admin_phone {
        deliveries.push(Delivery::Message(TextMessage {
            to: format_msisdn(admin_phone, &cfg.default_country_code),
            body: format!(
                "New order #{} - {} - {}",
                order.short_reference(),
                order.customer_info.name,
                money(order.total, cfg)
            ),
        }));
    }

    deliveries
}

fn order_status_changed(order: &Order, cfg: &NotifyConfig) -> Vec<Delivery> {
    let status_line = status_text(order.status);
    vec![
        Delivery::Email(EmailMessage {
            to: order.customer_info.email.clone(),
            subject: format!(
                "Order #{} update: {}",
                order.short_reference(),
                order.status
            ),
            body: format!(
                "Dear {},\n\n{}\n\nOrder #{} - total {}.\n\n{}",
                order.customer_info.name,
                status_line,
                order.short_reference(),
                money(order.total, cfg),
                cfg.brand_name
            ),
        }),
        Delivery::Message(TextMessage {
            to: format_msisdn(&order.customer_info.phone, &cfg.default_country_code),
            body: format!(
                "{}: order #{} - {}",
                cfg.brand_name,
                order.short_reference(),
                status_line
            ),
        }),
    ]
}

fn enquiry_received(enquiry: &Enquiry, cfg: &NotifyConfig) -> Vec<Delivery> {
    let mut deliveries = Vec::new();

    if let Some(admin_email) = &cfg.admin_email {
        deliveries.push(Delivery::Email(EmailMessage {
            to: admin_email.clone(),
            subject: format!("New {} enquiry from {}", enquiry.enquiry_type, enquiry.name),
            body: format!(
                "From: {} ({})\nEmail: {}\nType: {}\n\n{}",
                enquiry.name,
                enquiry.phone,
                enquiry.email.as_deref().unwrap_or("-"),
                enquiry.enquiry_type,
                enquiry.message
            ),
        }));
    }
    if let Some(admin_phone) = &cfg.admin_phone {
        deliveries.push(Delivery::Message(TextMessage {
            to: format_msisdn(admin_phone, &cfg.default_country_code),
            body: format!("New {} enquiry from {}", enquiry.enquiry_type, enquiry.name),
        }));
    }

    // Customer confirmation: email only when an address was supplied
    if let Some(email) = &enquiry.email {
        deliveries.push(Delivery::Email(EmailMessage {
            to: email.clone(),
            subject: format!("We received your enquiry - {}", cfg.brand_name),
            body: format!(
                "Dear {},\n\nThanks for reaching out! We received your {} enquiry and will get back to you shortly.\n\n{}",
                enquiry.name, enquiry.enquiry_type, cfg.brand_name
            ),
        }));
    }
    deliveries.push(Delivery::Message(TextMessage {
        to: format_msisdn(&enquiry.phone, &cfg.default_country_code),
        body: format!(
            "{}: thanks {}, we received your enquiry and will get back to you shortly.",
            cfg.brand_name, enquiry.name
        ),
    }));

    deliveries
}

fn enquiry_status_changed(enquiry: &Enquiry, cfg: &NotifyConfig) -> Vec<Delivery> {
    let mut deliveries = Vec::new();
    if let Some(email) = &enquiry.email {
        deliveries.push(Delivery::Email(EmailMessage {
            to: email.clone(),
            subject: format!("Your enquiry is {} - {}", enquiry.status, cfg.brand_name),
            body: format!(
                "Dear {},\n\nYour {} enquiry is now {}.\n\n{}",
                enquiry.name, enquiry.enquiry_type, enquiry.status, cfg.brand_name
            ),
        }));
    }
    deliveries.push(Delivery::Message(TextMessage {
        to: format_msisdn(&enquiry.phone, &cfg.default_country_code),
        body: format!(
            "{}: your enquiry is now {}.",
            cfg.brand_name, enquiry.status
        ),
    }));
    deliveries
}

// ── Rendering helpers ───────────────────────────────────────────────

fn money(amount: f64, cfg: &NotifyConfig) -> String {
    format!("{}{:.2}", cfg.currency, amount)
}

fn items_lines(order: &Order, cfg: &NotifyConfig) -> String {
    order
        .items
        .iter()
        .map(|item| {
            format!(
                "- {} {} x{} = {}",
                item.name,
                money(item.price, cfg),
                item.quantity,
                money(item.price * item.quantity as f64, cfg)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn order_summary(order: &Order, cfg: &NotifyConfig) -> String {
    format!(
        "{}\n\nTotal: {}",
        items_lines(order, cfg),
        money(order.total, cfg)
    )
}

fn fulfillment_block(order: &Order, cfg: &NotifyConfig) -> String {
    match order.delivery_option {
        DeliveryOption::Pickup => format!(
            "Pickup details:\nAddress: {}\nTiming: {}",
            cfg.pickup_address, cfg.pickup_hours
        ),
        DeliveryOption::Delivery => {
            let customer = &order.customer_info;
            format!(
                "Delivery address:\n{}\n{}, {}",
                customer.address.as_deref().unwrap_or(""),
                customer.city.as_deref().unwrap_or(""),
                customer.postal_code.as_deref().unwrap_or("")
            )
        }
    }
}

fn delivery_option_label(option: DeliveryOption) -> &'static str {
    match option {
        DeliveryOption::Pickup => "Self Pickup",
        DeliveryOption::Delivery => "Home Delivery",
    }
}

fn status_text(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Your order has been received.",
        OrderStatus::Preparing => "Our bakers are preparing your order.",
        OrderStatus::Ready => "Your order is ready for pickup or delivery.",
        OrderStatus::Completed => "Your order has been completed. Enjoy!",
        OrderStatus::Cancelled => "Your order has been cancelled.",
    }
}

/// Normalize a phone number to msisdn form: strip whitespace, keep an
/// existing `+` prefix, otherwise prepend the default country code
/// (dropping one leading zero).
pub fn format_msisdn(phone: &str, default_country_code: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.starts_with('+') {
        return cleaned;
    }
    let national = cleaned.strip_prefix('0').unwrap_or(&cleaned);
    format!("{default_country_code}{national}")
}
