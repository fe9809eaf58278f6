//! Controlled fields demo
//!
//! Builds a small form, wires change hooks and a listener, feeds it a
//! scripted series of inputs and prints the resulting values as JSON.

use anyhow::Result;
use controlled_fields::fields::{
    Checkfield, CheckfieldSettings, Numberfield, NumberfieldSettings, RadioGroup,
    RadiofieldSettings, Textfield, TextfieldSettings,
};
use controlled_fields::{
    hook_fn, listener_fn, FieldValue, FieldsConfig, FormContext, HookRegistry, Listener,
    ListenerRegistry,
};
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "controlled_fields=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FieldsConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Could not read config, using defaults: {err:#}");
        FieldsConfig::default()
    });

    let hooks = HookRegistry::new()
        .before_change(
            "age",
            hook_fn(|event| async move {
                if event.new_value.as_number().is_some_and(|age| age > 150.0) {
                    anyhow::bail!("age {} is not plausible", event.new_value);
                }
                Ok(())
            }),
        )
        .after_change(
            "newsletter",
            hook_fn(|event| async move {
                tracing::info!(
                    "Newsletter subscription changed: {} -> {}",
                    event.old_value,
                    event.new_value
                );
                Ok(())
            }),
        );

    let form = FormContext::builder()
        .field("name", "")
        .field("age", FieldValue::Null)
        .field("newsletter", false)
        .field("plan", "free")
        .hooks(hooks)
        .language(config.language())
        .build();

    let mut listener = Listener::mount(
        &form,
        ListenerRegistry::new()
            .on(
                "plan",
                listener_fn(|value, values| async move {
                    tracing::info!("Plan is now {value} ({} fields in form)", values.len());
                    Ok(())
                }),
            )
            .on(
                "newsletter",
                listener_fn(|value, _| async move {
                    tracing::info!("Listener saw newsletter = {value}");
                    Ok(())
                }),
            ),
    );

    let name = Textfield::new(
        &form,
        "name",
        TextfieldSettings {
            label: "Name".to_string(),
            size: config.field_size(),
            ..Default::default()
        },
    );
    let age = Numberfield::new(
        &form,
        "age",
        NumberfieldSettings {
            label: "Age".to_string(),
            size: config.field_size(),
            decimal_scale: config.decimal_scale(),
            ..Default::default()
        },
    );
    let newsletter = Checkfield::new(
        &form,
        "newsletter",
        CheckfieldSettings {
            label: "Subscribe to the newsletter".to_string(),
            ..Default::default()
        },
    );
    let plan = RadioGroup::new(
        &form,
        "plan",
        vec![
            RadiofieldSettings {
                label: "Free".to_string(),
                value: FieldValue::from("free"),
                ..Default::default()
            },
            RadiofieldSettings {
                label: "Pro".to_string(),
                value: FieldValue::from("pro"),
                ..Default::default()
            },
        ],
    );

    name.input("Ada Lovelace").await?;
    age.input("36").await?;
    if let Err(err) = age.input("200").await {
        tracing::warn!("Change rejected: {err}");
    }
    newsletter.toggle(true).await?;
    if let Some(pro) = plan.get(1) {
        pro.select().await?;
    }

    // Let the listener finish its rounds before unmounting it
    tokio::time::sleep(Duration::from_millis(50)).await;
    listener.unmount();
    while let Some(err) = listener.try_next_error() {
        tracing::warn!("Listener error: {err}");
    }

    tracing::info!(
        "Age shows as {:?}, plan option {:?} selected",
        age.display_value(),
        plan.selected()
    );
    println!("{}", serde_json::to_string_pretty(&*form.values())?);

    Ok(())
}
