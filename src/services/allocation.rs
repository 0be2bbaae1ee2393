// src/services/allocation.rs
//
// Motor de alocação da sugestão de produção.
//
// Percorre os produtos em ordem de prioridade (preço decrescente) e, para cada
// um, fabrica o máximo de unidades que a matéria-prima mais escassa permite,
// debitando um "razão" de estoque local. O que um produto consome não fica
// disponível para os próximos. Nada é persistido: o razão morre com a chamada.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::production::{
    BomRequirement, ProductCandidate, RawMaterialStock, SuggestionItem, SuggestionResult,
};

// ---
// Fontes de dados (somente leitura)
// ---

/// O que o motor precisa ler do catálogo. A implementação de produção é o
/// `ProductionSnapshot`, montado a partir do banco numa única transação.
pub trait ProductionCatalog {
    fn raw_material_stock(&self) -> &[RawMaterialStock];

    /// Produtos na ordem de prioridade do catálogo (preço decrescente, empates
    /// por ordem de cadastro).
    fn products_by_priority(&self) -> &[ProductCandidate];

    fn bom_for_product(&self, product_id: Uuid) -> &[BomRequirement];
}

/// Cópia em memória de estoque, produtos e fichas técnicas.
#[derive(Debug, Clone, Default)]
pub struct ProductionSnapshot {
    stock: Vec<RawMaterialStock>,
    products: Vec<ProductCandidate>,
    bom_by_product: HashMap<Uuid, Vec<BomRequirement>>,
}

impl ProductionSnapshot {
    pub fn new(
        stock: Vec<RawMaterialStock>,
        products: Vec<ProductCandidate>,
        bom_lines: Vec<BomRequirement>,
    ) -> Self {
        let mut bom_by_product: HashMap<Uuid, Vec<BomRequirement>> = HashMap::new();
        for line in bom_lines {
            bom_by_product.entry(line.product_id).or_default().push(line);
        }

        Self { stock, products, bom_by_product }
    }
}

impl ProductionCatalog for ProductionSnapshot {
    fn raw_material_stock(&self) -> &[RawMaterialStock] {
        &self.stock
    }

    fn products_by_priority(&self) -> &[ProductCandidate] {
        &self.products
    }

    fn bom_for_product(&self, product_id: Uuid) -> &[BomRequirement] {
        self.bom_by_product
            .get(&product_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ---
// Política de prioridade
// ---

/// Comparador que decide quem é produzido primeiro. A ordenação é estável:
/// produtos "iguais" para a política mantêm a ordem do catálogo.
pub trait PriorityPolicy {
    fn compare(&self, a: &ProductCandidate, b: &ProductCandidate) -> Ordering;
}

/// Regra de negócio atual: o mais caro primeiro.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceDescending;

impl PriorityPolicy for PriceDescending {
    fn compare(&self, a: &ProductCandidate, b: &ProductCandidate) -> Ordering {
        b.price.cmp(&a.price)
    }
}

// ---
// Motor
// ---

#[derive(Debug, Clone, Default)]
pub struct AllocationEngine<P = PriceDescending> {
    policy: P,
}

impl AllocationEngine<PriceDescending> {
    pub fn new() -> Self {
        Self { policy: PriceDescending }
    }
}

impl<P: PriorityPolicy> AllocationEngine<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn suggest<C: ProductionCatalog + ?Sized>(&self, catalog: &C) -> SuggestionResult {
        // Razão de trabalho: id da matéria-prima -> saldo restante.
        let mut ledger: HashMap<Uuid, Decimal> = catalog
            .raw_material_stock()
            .iter()
            .map(|s| (s.raw_material_id, s.stock_quantity))
            .collect();

        let mut products: Vec<&ProductCandidate> = catalog.products_by_priority().iter().collect();
        products.sort_by(|a, b| self.policy.compare(a, b));

        let mut result = SuggestionResult::default();

        for product in products {
            let bom = catalog.bom_for_product(product.product_id);

            if bom.is_empty() {
                tracing::debug!(product = %product.code, "Produto sem ficha técnica, ignorado");
                continue;
            }

            let units = max_producible_units(product, bom, &ledger);

            if units <= 0 {
                tracing::debug!(product = %product.code, "Sem matéria-prima para produzir");
                continue;
            }

            let quantity = Decimal::from(units);

            // Valor acima do teto do Decimal: o produto fica de fora e não consome estoque.
            let Some((total_value, grand_total)) = product
                .price
                .checked_mul(quantity)
                .and_then(|value| Some((value, result.total_value.checked_add(value)?)))
            else {
                tracing::warn!(
                    product = %product.code,
                    units,
                    "Valor da produção excede o limite decimal; produto não será sugerido"
                );
                continue;
            };

            for line in bom {
                let remaining = ledger.entry(line.raw_material_id).or_insert(Decimal::ZERO);
                *remaining -= line.required_quantity * quantity;
            }

            tracing::debug!(product = %product.code, units, %total_value, "Produção sugerida");

            result.total_value = grand_total;
            result.items.push(SuggestionItem {
                product_id: product.product_id,
                product_code: product.code.clone(),
                product_name: product.name.clone(),
                unit_price: product.price,
                producible_quantity: units,
                total_value,
            });
        }

        tracing::info!(
            items = result.items.len(),
            total_value = %result.total_value,
            "Sugestão de produção calculada"
        );

        result
    }
}

/// Mínimo, entre as linhas da ficha, de `floor(saldo / consumo por unidade)`.
/// Uma linha com consumo <= 0 é dado inválido e zera o produto inteiro.
fn max_producible_units(
    product: &ProductCandidate,
    bom: &[BomRequirement],
    ledger: &HashMap<Uuid, Decimal>,
) -> i64 {
    let mut max: Option<i64> = None;

    for line in bom {
        let required = line.required_quantity;

        if required <= Decimal::ZERO {
            tracing::warn!(
                product = %product.code,
                raw_material_id = %line.raw_material_id,
                %required,
                "Consumo por unidade não positivo na ficha técnica; produto não será sugerido"
            );
            return 0;
        }

        let stock = ledger.get(&line.raw_material_id).copied().unwrap_or(Decimal::ZERO);
        let possible = units_from_stock(stock, required);

        max = Some(max.map_or(possible, |current| current.min(possible)));
    }

    max.unwrap_or(0)
}

/// `floor(stock / required)` como inteiro, com `required > 0`.
fn units_from_stock(stock: Decimal, required: Decimal) -> i64 {
    if stock < required {
        return 0;
    }

    let Some(quotient) = stock.checked_div(required) else {
        return i64::MAX;
    };
    let mut units = quotient.floor();

    // A divisão decimal arredonda na 28ª casa; um quociente como 2.99..9 pode
    // virar 3. Conferimos pela multiplicação, que é exata.
    if units.checked_mul(required).is_some_and(|consumed| consumed > stock) {
        units -= Decimal::ONE;
    } else if (units + Decimal::ONE)
        .checked_mul(required)
        .is_some_and(|consumed| consumed <= stock)
    {
        units += Decimal::ONE;
    }

    units.to_i64().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn product(n: u128, code: &str, price: &str) -> ProductCandidate {
        ProductCandidate {
            product_id: id(n),
            code: code.to_string(),
            name: format!("Produto {code}"),
            price: d(price),
        }
    }

    fn stock(n: u128, quantity: &str) -> RawMaterialStock {
        RawMaterialStock { raw_material_id: id(n), stock_quantity: d(quantity) }
    }

    fn line(product: u128, raw_material: u128, required: &str) -> BomRequirement {
        BomRequirement {
            product_id: id(product),
            raw_material_id: id(raw_material),
            required_quantity: d(required),
        }
    }

    fn suggest(snapshot: &ProductionSnapshot) -> SuggestionResult {
        AllocationEngine::new().suggest(snapshot)
    }

    fn assert_result_invariants(result: &SuggestionResult) {
        let sum: Decimal = result.items.iter().map(|i| i.total_value).sum();
        assert_eq!(result.total_value, sum);
        for item in &result.items {
            assert!(item.producible_quantity >= 1, "{item:?}");
            assert_eq!(item.total_value, item.unit_price * Decimal::from(item.producible_quantity));
        }
    }

    // Estoque 10; P1 (1000) usa 2 por unidade, P2 (100) usa 1: só P1 sai.
    #[test]
    fn higher_price_consumes_stock_first() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10")],
            vec![product(1, "P001", "1000"), product(2, "P002", "100")],
            vec![line(1, 100, "2"), line(2, 100, "1")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "P001");
        assert_eq!(result.items[0].producible_quantity, 5);
        assert_eq!(result.items[0].total_value, d("5000"));
        assert_eq!(result.total_value, d("5000"));
        assert_result_invariants(&result);
    }

    #[test]
    fn product_without_bom_is_skipped() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "1000")],
            vec![product(1, "P001", "10")],
            vec![],
        );

        let result = suggest(&snapshot);

        assert!(result.items.is_empty());
        assert_eq!(result.total_value, Decimal::ZERO);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let result = suggest(&ProductionSnapshot::default());

        assert_eq!(result, SuggestionResult::default());
    }

    #[test]
    fn zero_required_quantity_excludes_product() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "50"), stock(101, "50")],
            vec![product(1, "P001", "10")],
            vec![line(1, 100, "1"), line(1, 101, "0")],
        );

        assert!(suggest(&snapshot).items.is_empty());
    }

    #[test]
    fn negative_required_quantity_does_not_touch_ledger() {
        // Se P1 consumisse algo, P2 produziria menos que 10.
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10")],
            vec![product(1, "P001", "500"), product(2, "P002", "50")],
            vec![line(1, 100, "1"), line(1, 101, "-2"), line(2, 100, "1")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "P002");
        assert_eq!(result.items[0].producible_quantity, 10);
    }

    #[test]
    fn exact_multiple_of_requirement_has_no_off_by_one() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "7.5")],
            vec![product(1, "P001", "3.33")],
            vec![line(1, 100, "1.5")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items[0].producible_quantity, 5);
        assert_eq!(result.total_value, d("16.65"));
    }

    #[test]
    fn repeating_decimal_quotient_rounds_down() {
        // 10 / 0.333 = 30.03..., 1 / 0.3 = 3.33...
        assert_eq!(units_from_stock(d("10"), d("0.333")), 30);
        assert_eq!(units_from_stock(d("1"), d("0.3")), 3);
        assert_eq!(units_from_stock(d("0.999"), d("1")), 0);
        assert_eq!(units_from_stock(d("0"), d("0.001")), 0);
        assert_eq!(units_from_stock(d("-4"), d("1")), 0);
    }

    #[test]
    fn fractional_stock_is_floored() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "9.999")],
            vec![product(1, "P001", "2.50")],
            vec![line(1, 100, "2")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items[0].producible_quantity, 4);
        assert_eq!(result.items[0].total_value, d("10.00"));
    }

    #[test]
    fn tightest_material_limits_production() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "100"), stock(101, "7"), stock(102, "40")],
            vec![product(1, "P001", "20")],
            vec![line(1, 100, "10"), line(1, 101, "2"), line(1, 102, "4")],
        );

        // 100/10 = 10, 7/2 = 3, 40/4 = 10
        assert_eq!(suggest(&snapshot).items[0].producible_quantity, 3);
    }

    #[test]
    fn missing_stock_entry_counts_as_zero() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10")],
            vec![product(1, "P001", "20")],
            vec![line(1, 100, "1"), line(1, 999, "1")],
        );

        assert!(suggest(&snapshot).items.is_empty());
    }

    #[test]
    fn lower_priority_product_gets_leftovers() {
        // P1 leva 3 unidades (9 de 10); P2 fica com o resto de 1.
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10"), stock(101, "30")],
            vec![product(1, "P001", "300"), product(2, "P002", "40")],
            vec![line(1, 100, "3"), line(2, 100, "0.5"), line(2, 101, "1")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].product_code, "P001");
        assert_eq!(result.items[0].producible_quantity, 3);
        assert_eq!(result.items[1].product_code, "P002");
        assert_eq!(result.items[1].producible_quantity, 2);
        assert_eq!(result.total_value, d("980"));
        assert_result_invariants(&result);
    }

    #[test]
    fn independent_products_do_not_compete() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10"), stock(101, "4")],
            vec![product(1, "P001", "10"), product(2, "P002", "5")],
            vec![line(1, 100, "1"), line(2, 101, "1")],
        );

        let result = suggest(&snapshot);

        let quantities: Vec<i64> = result.items.iter().map(|i| i.producible_quantity).collect();
        assert_eq!(quantities, vec![10, 4]);
        assert_eq!(result.total_value, d("120"));
    }

    #[test]
    fn engine_sorts_even_when_catalog_is_unordered() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "4")],
            vec![product(2, "CHEAP", "1"), product(1, "PRICY", "99")],
            vec![line(1, 100, "1"), line(2, 100, "1")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "PRICY");
    }

    #[test]
    fn price_ties_keep_catalog_order() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "3")],
            vec![product(7, "FIRST", "50"), product(3, "SECOND", "50")],
            vec![line(7, 100, "2"), line(3, 100, "2")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "FIRST");
        assert_eq!(result.items[0].producible_quantity, 1);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "12.5"), stock(101, "8")],
            vec![product(1, "P001", "75.10"), product(2, "P002", "30")],
            vec![line(1, 100, "2.5"), line(1, 101, "3"), line(2, 100, "1.25")],
        );
        let engine = AllocationEngine::new();

        let first = engine.suggest(&snapshot);
        let second = engine.suggest(&snapshot);

        assert_eq!(first, second);
        assert_result_invariants(&first);
    }

    #[test]
    fn totals_stay_exact_over_many_items() {
        let products: Vec<ProductCandidate> = (1..=50u128)
            .map(|n| product(n, &format!("P{n:03}"), "0.10"))
            .collect();
        let stock: Vec<RawMaterialStock> = (1..=50u128).map(|n| stock(1000 + n, "3")).collect();
        let lines: Vec<BomRequirement> = (1..=50u128).map(|n| line(n, 1000 + n, "1")).collect();

        let result = suggest(&ProductionSnapshot::new(stock, products, lines));

        assert_eq!(result.items.len(), 50);
        assert_eq!(result.total_value, d("15.00"));
        assert_result_invariants(&result);
    }

    struct CheapestFirst;

    impl PriorityPolicy for CheapestFirst {
        fn compare(&self, a: &ProductCandidate, b: &ProductCandidate) -> Ordering {
            a.price.cmp(&b.price)
        }
    }

    #[test]
    fn custom_policy_changes_processing_order() {
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "10")],
            vec![product(1, "P001", "1000"), product(2, "P002", "100")],
            vec![line(1, 100, "2"), line(2, 100, "1")],
        );

        let result = AllocationEngine::with_policy(CheapestFirst).suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "P002");
        assert_eq!(result.items[0].producible_quantity, 10);
    }

    #[test]
    fn value_overflow_skips_product_without_consuming_stock() {
        // 10^21 / 0.001 unidades satura em i64::MAX; vezes 10^10 passa do teto do Decimal.
        let snapshot = ProductionSnapshot::new(
            vec![stock(100, "1000000000000000000000"), stock(200, "5")],
            vec![product(1, "P001", "10000000000"), product(2, "P002", "3")],
            vec![line(1, 100, "0.001"), line(2, 200, "1")],
        );

        let result = suggest(&snapshot);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product_code, "P002");
        assert_eq!(result.items[0].producible_quantity, 5);
        assert_eq!(result.total_value, d("15"));
        assert_result_invariants(&result);
    }
}
