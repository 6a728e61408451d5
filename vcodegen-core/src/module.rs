use serde::Serialize;

use crate::{Error, Parameter, Port, PortDirection, Result};

/// Ports of a module bucketed by direction, each bucket in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ports {
    input: Vec<Port>,
    output: Vec<Port>,
    inout: Vec<Port>,
}

impl Ports {
    pub fn get(&self, direction: PortDirection) -> &[Port] {
        match direction {
            PortDirection::Input => &self.input,
            PortDirection::Output => &self.output,
            PortDirection::Inout => &self.inout,
        }
    }

    fn bucket_mut(&mut self, direction: PortDirection) -> &mut Vec<Port> {
        match direction {
            PortDirection::Input => &mut self.input,
            PortDirection::Output => &mut self.output,
            PortDirection::Inout => &mut self.inout,
        }
    }

    /// All ports, inputs first, then outputs, then inouts.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        PortDirection::ALL
            .into_iter()
            .flat_map(move |direction| self.get(direction).iter())
    }

    pub fn len(&self) -> usize {
        self.input.len() + self.output.len() + self.inout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Port> for Ports {
    fn from_iter<T: IntoIterator<Item = Port>>(iter: T) -> Self {
        let mut ports = Ports::default();
        for port in iter {
            ports.bucket_mut(port.direction()).push(port);
        }
        ports
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    name: String,
    parameters: Vec<Parameter>,
    ports: Ports,
}

impl Module {
    pub fn new(
        name: &str,
        parameters: Vec<Parameter>,
        ports: impl IntoIterator<Item = Port>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_spec(name, "module name must not be empty"));
        }

        Ok(Self {
            name: name.to_string(),
            parameters,
            ports: ports.into_iter().collect(),
        })
    }

    /// Build a module from compact `name[#width]` port and `name[=default]`
    /// parameter descriptions, keeping the order they were given in.
    pub fn from_descriptions<S: AsRef<str>>(
        name: &str,
        parameters: &[S],
        ports: &[(PortDirection, S)],
    ) -> Result<Self> {
        let parameters = parameters
            .iter()
            .map(|description| Parameter::from_description(description.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let ports = ports
            .iter()
            .map(|(direction, description)| {
                Port::from_description(*direction, description.as_ref())
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(name, parameters, ports)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn ports(&self) -> &Ports {
        &self.ports
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "module: {}", self.name)?;
        writeln!(f, "parameters:")?;
        for parameter in &self.parameters {
            writeln!(f, "\t{}", parameter)?;
        }
        write!(f, "ports:")?;
        for port in self.ports.iter() {
            write!(f, "\n\t{}", port)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_are_bucketed_in_order() {
        let module = Module::from_descriptions(
            "uartRx",
            &["CLK_FREQ", "MSG_BITS=8"],
            &[
                (PortDirection::Input, "clk"),
                (PortDirection::Output, "symbol_o#MSG_BITS"),
                (PortDirection::Input, "rst_n"),
                (PortDirection::Input, "uart_i"),
                (PortDirection::Output, "newSymbol_o"),
            ],
        )
        .unwrap();

        let inputs: Vec<&str> = module
            .ports()
            .get(PortDirection::Input)
            .iter()
            .map(Port::identifier)
            .collect();
        assert_eq!(inputs, vec!["clk", "rst_n", "uart_i"]);

        let outputs: Vec<&str> = module
            .ports()
            .get(PortDirection::Output)
            .iter()
            .map(Port::identifier)
            .collect();
        assert_eq!(outputs, vec!["symbol_o", "newSymbol_o"]);
        assert!(module.ports().get(PortDirection::Inout).is_empty());

        assert_eq!(module.parameters().len(), 2);
        assert_eq!(module.parameters()[1].default_value(), Some("8"));
    }

    #[test]
    fn test_iter_groups_by_direction() {
        let module = Module::from_descriptions(
            "m",
            &[] as &[&str],
            &[
                (PortDirection::Inout, "pad"),
                (PortDirection::Output, "q"),
                (PortDirection::Input, "d"),
            ],
        )
        .unwrap();

        let order: Vec<&str> = module.ports().iter().map(Port::identifier).collect();
        assert_eq!(order, vec!["d", "q", "pad"]);
        assert_eq!(module.ports().len(), 3);
    }

    #[test]
    fn test_invalid_description_is_reported() {
        let result = Module::from_descriptions(
            "m",
            &[] as &[&str],
            &[(PortDirection::Input, "#4")],
        );
        assert!(matches!(result, Err(Error::InvalidSpec { .. })));
        assert!(Module::new("", Vec::new(), Vec::new()).is_err());
    }
}
