use crate::commands::context::{open_session, GlobalOptions};
use crate::core::{
    date_key::DateKey,
    error::Result,
    layers::{LayerKind, RenderLayer},
};
use serde_json::{json, Map, Value};

/// Which layers `export` writes
fn parse_layer(raw: &str) -> Result<LayerKind> {
    match raw.trim() {
        "frontline" => Ok(LayerKind::Frontline),
        other => other.parse(),
    }
}

fn collect_layers<'a, L: RenderLayer + 'a>(layers: impl IntoIterator<Item = &'a L>) -> Value {
    Value::Array(layers.into_iter().map(RenderLayer::to_geojson).collect())
}

/// Print the rendered layers for `date` as GeoJSON
pub async fn execute_export(options: &GlobalOptions, date: &str, layer: Option<&str>) -> Result<()> {
    let only = layer.map(parse_layer).transpose()?;
    let key = DateKey::from_input(date)?;
    let session = open_session(options, Some(key.as_str())).await?;

    let wanted = |kind: LayerKind| only.map_or(true, |only| only == kind);
    let selection = session.selection();
    let mut layers = Map::new();

    if wanted(LayerKind::Frontline) {
        let frontline = selection
            .layers
            .frontline
            .as_ref()
            .map(RenderLayer::to_geojson)
            .unwrap_or(Value::Null);
        layers.insert(LayerKind::Frontline.to_string(), frontline);
    }
    if wanted(LayerKind::Units) {
        layers.insert(LayerKind::Units.to_string(), collect_layers(&selection.layers.units));
    }
    if wanted(LayerKind::Geos) {
        layers.insert(LayerKind::Geos.to_string(), collect_layers(&selection.layers.geos));
    }
    for kind in [LayerKind::Fortifications, LayerKind::DragonTeeth] {
        if only == Some(kind) {
            let value = session
                .static_layer(kind)
                .map(RenderLayer::to_geojson)
                .unwrap_or(Value::Null);
            layers.insert(kind.to_string(), value);
        }
    }

    let document = json!({
        "date": key.to_date_string(),
        "layers": layers,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
