use std::fmt::Write;

use catalogo_core::types::Product;
use catalogo_core::ui::{UiState, View};

/// Renders the current screen as plain text.
pub fn render(state: &UiState) -> String {
    let mut out = String::new();
    match state.view() {
        View::Home => {
            out.push_str("Bienvenido a la Gestión de Productos\n");
            for (view, label) in [
                (View::List, "Listar Productos"),
                (View::Search, "Buscar Producto"),
                (View::Create, "Crear Producto"),
                (View::Update, "Actualizar Producto"),
            ] {
                let _ = writeln!(out, "  {:<11} {label}", view.as_str());
            }
        }
        View::List => {
            out.push_str("Listado de Productos\n");
            for product in state.productos() {
                let _ = writeln!(out, "  {}", product_line(product));
            }
        }
        View::Search => {
            out.push_str("Buscar Producto por Código\n");
            let _ = writeln!(out, "  Código del Producto: {}", state.search_code());
            if let Some(product) = state.search_result() {
                out.push_str("Producto Encontrado\n");
                let _ = writeln!(out, "  {}", product_line(product));
            }
        }
        View::Create => {
            let form = state.create_form();
            out.push_str("Crear Producto\n");
            let _ = writeln!(out, "  Nombre: {}", form.nombre);
            let _ = writeln!(out, "  Código: {}", form.codigo);
            let _ = writeln!(out, "  Precio: {}", form.precio);
        }
        View::Update => {
            let form = state.update_form();
            out.push_str("Actualizar Producto\n");
            let _ = writeln!(out, "  ID del Producto: {}", form.id);
            let _ = writeln!(out, "  Nombre: {}", form.nombre);
            let _ = writeln!(out, "  Código: {}", form.codigo);
            let _ = writeln!(out, "  Precio: {}", form.precio);
        }
    }

    if state.view() != View::Home {
        if let Some(error) = state.error() {
            let _ = writeln!(out, "! {error}");
        }
        let _ = writeln!(out, "  {:<11} Volver al Inicio", View::Home.as_str());
    }
    out
}

fn product_line(product: &Product) -> String {
    format!("{} - {} - ${}", product.nombre, product.codigo, product.precio)
}
