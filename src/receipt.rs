//! Order receipts ("cupons").
//!
//! A receipt is laid out as a list of styled lines, then flowed onto A4 pages.
//! Files are named after the order id only and are replaced atomically, so a
//! retried generation for the same order can never leave a torn PDF behind.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use thiserror::Error;

use crate::models::{Order, order_total};

pub const STORE_NAME: &str = "TecNorte Informática";
const TAGLINE: &str = "Soluções rápidas em tecnologia & delivery";
const FOOTER: [&str; 2] = [
    "Obrigado por comprar na TecNorte Informática!",
    "Sinop - MT | tec-norte.com.br",
];

/// URL path the receipts directory is served under.
pub const PUBLIC_PATH: &str = "/data/cupons";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("receipt io: {0}")]
    Io(#[from] std::io::Error),

    #[error("receipt render: {0}")]
    Render(String),

    #[error("receipt worker: {0}")]
    Worker(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptLine {
    Title(String),
    Tagline(String),
    Heading(String),
    Text(String),
    Separator,
    Gap,
    Footer(String),
}

impl ReceiptLine {
    fn font_size(&self) -> f32 {
        match self {
            ReceiptLine::Title(_) => 18.0,
            ReceiptLine::Tagline(_) | ReceiptLine::Footer(_) => 10.0,
            _ => 12.0,
        }
    }

    /// Vertical space the line occupies, in millimetres.
    fn advance(&self) -> f32 {
        match self {
            ReceiptLine::Gap => 5.0,
            line => line.font_size() * PT_TO_MM * 1.5,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            ReceiptLine::Title(t)
            | ReceiptLine::Tagline(t)
            | ReceiptLine::Heading(t)
            | ReceiptLine::Text(t)
            | ReceiptLine::Footer(t) => Some(t),
            ReceiptLine::Separator => Some("--------------------------"),
            ReceiptLine::Gap => None,
        }
    }

    fn centered(&self) -> bool {
        matches!(
            self,
            ReceiptLine::Title(_) | ReceiptLine::Tagline(_) | ReceiptLine::Footer(_)
        )
    }

    fn color(&self) -> Color {
        let (r, g, b) = match self {
            ReceiptLine::Title(_) => (0.0, 0.37, 1.0),
            ReceiptLine::Footer(_) => (0.5, 0.5, 0.5),
            _ => (0.0, 0.0, 0.0),
        };
        Color::Rgb(Rgb::new(r, g, b, None))
    }
}

fn render_err(err: impl std::fmt::Display) -> ReceiptError {
    ReceiptError::Render(err.to_string())
}

pub fn money(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Fixed receipt layout for a committed order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    pub order_id: i32,
    pub total: f64,
    pub lines: Vec<ReceiptLine>,
}

impl ReceiptLayout {
    pub fn for_order(order: &Order) -> Self {
        let total = order_total(&order.itens);
        let mut lines = vec![
            ReceiptLine::Title(STORE_NAME.to_string()),
            ReceiptLine::Tagline(TAGLINE.to_string()),
            ReceiptLine::Gap,
            ReceiptLine::Text(format!("Pedido Nº: {}", order.id)),
            ReceiptLine::Text(format!("Data: {}", order.data.format("%d/%m/%Y %H:%M:%S UTC"))),
            ReceiptLine::Gap,
            ReceiptLine::Heading("Itens:".to_string()),
        ];

        for (position, item) in order.itens.iter().enumerate() {
            lines.push(ReceiptLine::Text(format!(
                "{}. {} - {}x {} = {}",
                position + 1,
                item.nome,
                item.quantidade,
                money(item.preco),
                money(item.subtotal())
            )));
        }

        lines.push(ReceiptLine::Gap);
        lines.push(ReceiptLine::Separator);
        lines.push(ReceiptLine::Text(format!("Total: {}", money(total))));
        lines.push(ReceiptLine::Text(format!(
            "Pagamento: {}",
            order.pagamento.as_deref().unwrap_or("-")
        )));
        lines.push(ReceiptLine::Gap);

        lines.push(ReceiptLine::Heading("Cliente:".to_string()));
        lines.push(ReceiptLine::Text(format!("Nome: {}", order.cliente.nome)));
        lines.push(ReceiptLine::Text(format!("Contato: {}", order.cliente.contato)));
        if let Some(endereco) = &order.cliente.endereco {
            lines.push(ReceiptLine::Text(format!("Endereço: {endereco}")));
        }
        lines.push(ReceiptLine::Gap);

        lines.extend(FOOTER.iter().map(|f| ReceiptLine::Footer(f.to_string())));

        Self {
            order_id: order.id,
            total,
            lines,
        }
    }

    pub fn total_line(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            ReceiptLine::Text(t) if t.starts_with("Total: ") => Some(t.as_str()),
            _ => None,
        })
    }

    /// Render to PDF bytes, starting a new page whenever the current one is full.
    pub fn render_pdf(&self) -> Result<Vec<u8>, ReceiptError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("Pedido {}", self.order_id),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Cupom",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for line in &self.lines {
            let advance = line.advance();
            if y - advance < MARGIN_MM {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Cupom");
                current = doc.get_page(page).get_layer(layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            y -= advance;

            let Some(text) = line.text() else { continue };
            let size = line.font_size();
            let font = match line {
                ReceiptLine::Title(_) | ReceiptLine::Heading(_) => &bold,
                _ => &regular,
            };
            let x = if line.centered() {
                // Helvetica averages about half an em per glyph.
                let width = text.chars().count() as f32 * size * 0.5 * PT_TO_MM;
                ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
            } else {
                MARGIN_MM
            };

            current.set_fill_color(line.color());
            current.use_text(text, size, Mm(x), Mm(y), font);
        }

        doc.save_to_bytes().map_err(render_err)
    }
}

/// Writes receipts into one directory and knows their public URLs.
#[derive(Debug, Clone)]
pub struct ReceiptGenerator {
    dir: PathBuf,
    public_base_url: String,
}

impl ReceiptGenerator {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(order_id: i32) -> String {
        format!("pedido_{order_id}.pdf")
    }

    pub fn path_for(&self, order_id: i32) -> PathBuf {
        self.dir.join(Self::file_name(order_id))
    }

    pub fn url_for(&self, order_id: i32) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url,
            PUBLIC_PATH,
            Self::file_name(order_id)
        )
    }

    pub async fn exists(&self, order_id: i32) -> bool {
        tokio::fs::metadata(self.path_for(order_id))
            .await
            .is_ok_and(|meta| meta.is_file())
    }

    /// Render and atomically write the receipt. Blocking.
    pub fn generate(&self, order: &Order) -> Result<PathBuf, ReceiptError> {
        let bytes = ReceiptLayout::for_order(order).render_pdf()?;

        std::fs::create_dir_all(&self.dir)?;
        let target = self.path_for(order.id);
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|e| e.error)?;

        tracing::debug!(order_id = order.id, path = %target.display(), "receipt written");
        Ok(target)
    }

    /// Run [`generate`](Self::generate) on the blocking pool; a panicking
    /// renderer surfaces as [`ReceiptError::Worker`].
    pub async fn generate_async(&self, order: Order) -> Result<PathBuf, ReceiptError> {
        let generator = self.clone();
        tokio::task::spawn_blocking(move || generator.generate(&order))
            .await
            .map_err(|e| ReceiptError::Worker(e.to_string()))?
    }
}
