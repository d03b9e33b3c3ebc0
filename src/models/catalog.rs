use serde::Serialize;

/// A service category offered in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

const fn category(id: &'static str, name: &'static str, icon: &'static str) -> ServiceCategory {
    ServiceCategory { id, name, icon }
}

pub static SERVICES: [ServiceCategory; 20] = [
    category("eletricista", "Eletricista", "⚡"),
    category("encanador", "Encanador", "🔧"),
    category("diarista", "Diarista", "🧹"),
    category("pintor", "Pintor", "🎨"),
    category("jardineiro", "Jardineiro", "🌱"),
    category("marceneiro", "Marceneiro", "🔨"),
    category("pedreiro", "Pedreiro", "🧱"),
    category("chaveiro", "Chaveiro", "🔑"),
    category("tecnico-ar", "Técnico em Ar Condicionado", "❄️"),
    category("motoboy", "Motoboy", "🏍️"),
    category("vidraceiro", "Vidraceiro", "🪟"),
    category("faxineiro", "Faxineiro", "🧼"),
    category("motorista", "Motorista", "🚗"),
    category("ajudante-geral", "Ajudante Geral", "🧰"),
    category("seguranca", "Segurança", "🛡️"),
    category("assistente-tecnico", "Assistente Técnico", "🛠️"),
    category("eletronico", "Técnico em Eletrônicos", "📺"),
    category("montador", "Montador de Móveis", "🪑"),
    category("cabeleireiro", "Cabeleireiro", "💇"),
    category("massagista", "Massagista", "💆"),
];

pub static NEIGHBORHOODS: [&str; 15] = [
    "Centro",
    "Copacabana",
    "Ipanema",
    "Botafogo",
    "Flamengo",
    "Tijuca",
    "Barra da Tijuca",
    "Jacarepaguá",
    "Vila Isabel",
    "Maracanã",
    "Lapa",
    "Santa Teresa",
    "Leblon",
    "Gávea",
    "Laranjeiras",
];

/// Look up a category by its id
pub fn find_service(id: &str) -> Option<&'static ServiceCategory> {
    SERVICES.iter().find(|s| s.id == id)
}
