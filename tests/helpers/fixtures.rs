//! Symbol tables shared across tests.

use std::sync::Arc;

use codeconv::semantic::{EQUALITY_OPERATOR, SpecialType, Symbol, SymbolId, SymbolKind, SymbolTable, TypeInfo, TypeKind};
use once_cell::sync::Lazy;

/// Only the special types; enough for trees nothing is bound in.
pub static SPECIAL_TYPES: Lazy<Arc<SymbolTable>> = Lazy::new(|| Arc::new(SymbolTable::with_special_types()));

/// A `Form` class with an event, a handler method and a few fields.
pub struct FormSymbols {
    pub table: Arc<SymbolTable>,
    pub form: SymbolId,
    pub widget: SymbolId,
    pub click: SymbolId,
    pub handler: SymbolId,
    /// `Widget item`
    pub item: SymbolId,
    /// `int count`
    pub count: SymbolId,
    /// `int b`, the right operand of an ambiguous `a<b`
    pub b: SymbolId,
    /// `int value`
    pub lower_value: SymbolId,
    /// `int Value`
    pub upper_value: SymbolId,
    /// `string text`
    pub text: SymbolId,
    /// `Widget other`
    pub other: SymbolId,
    /// `Money price` and `Money cost`, a class with its own `==`
    pub price: SymbolId,
    pub cost: SymbolId,
    /// `void Set(int value)` and its parameter
    pub set: SymbolId,
    pub value_param: SymbolId,
}

pub static FORM: Lazy<FormSymbols> = Lazy::new(|| {
    let mut table = SymbolTable::with_special_types();
    let (Some(int32), Some(string)) = (table.special_type(SpecialType::Int32), table.special_type(SpecialType::String))
    else {
        panic!("special types include Int32 and String");
    };
    let form = table.insert(Symbol::type_symbol("Form", TypeInfo::new(TypeKind::Class).with_namespace("App")));
    let widget = table.insert(Symbol::type_symbol("Widget", TypeInfo::new(TypeKind::Class).with_namespace("App")));
    let money = table.insert(Symbol::type_symbol("Money", TypeInfo::new(TypeKind::Class).with_namespace("App")));
    table.insert(Symbol::new(EQUALITY_OPERATOR, SymbolKind::Method).in_type(money).shared());
    let click = table.insert(Symbol::new("Click", SymbolKind::Event).in_type(form));
    let handler = table.insert(Symbol::new("Handler", SymbolKind::Method).in_type(form));
    let field = |name: &str, ty: SymbolId| Symbol::new(name, SymbolKind::Field).in_type(form).of_type(ty);
    let item = table.insert(field("item", widget));
    let count = table.insert(field("count", int32));
    let b = table.insert(field("b", int32));
    let lower_value = table.insert(field("value", int32));
    let upper_value = table.insert(field("Value", int32));
    let text = table.insert(field("text", string));
    let other = table.insert(field("other", widget));
    let price = table.insert(field("price", money));
    let cost = table.insert(field("cost", money));
    let set = table.insert(Symbol::new("Set", SymbolKind::Method).in_type(form));
    let value_param = table.add_parameter(set, Symbol::new("value", SymbolKind::Parameter).of_type(int32));
    FormSymbols {
        table: Arc::new(table),
        form,
        widget,
        click,
        handler,
        item,
        count,
        b,
        lower_value,
        upper_value,
        text,
        other,
        price,
        cost,
        set,
        value_param,
    }
});
